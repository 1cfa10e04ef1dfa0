// ── Inverse document frequency table ──
//
// Built once per registry snapshot. Generic words ("light", "sensor")
// appear in many entities and weigh little; rare words weigh a lot.

use std::collections::{HashMap, HashSet};

use super::tokenize::tokenize;

/// Per-token weights derived from the registry corpus.
#[derive(Debug, Clone, Default)]
pub struct TokenIdf {
    weights: HashMap<String, f64>,
    documents: usize,
}

impl TokenIdf {
    pub const MIN_WEIGHT: f64 = 0.5;
    pub const MAX_WEIGHT: f64 = 10.0;
    /// Weight of a token the corpus has never seen.
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    /// Build weights from one normalized text per entity.
    ///
    /// `df(t)` counts documents containing `t` at least once and the weight
    /// is `clamp(log2(N / df), 0.5, 10)`.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_corpus<'a>(documents: impl IntoIterator<Item = &'a str>) -> Self {
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut total = 0usize;

        for doc in documents {
            total += 1;
            let unique: HashSet<String> = tokenize(doc).into_iter().collect();
            for token in unique {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        let n = total as f64;
        let weights = doc_freq
            .into_iter()
            .map(|(token, df)| {
                let weight = (n / df as f64)
                    .log2()
                    .clamp(Self::MIN_WEIGHT, Self::MAX_WEIGHT);
                (token, weight)
            })
            .collect();

        Self {
            weights,
            documents: total,
        }
    }

    /// Weight for `token`, defaulting to 1 when absent.
    pub fn weight(&self, token: &str) -> f64 {
        self.weights
            .get(token)
            .copied()
            .unwrap_or(Self::DEFAULT_WEIGHT)
    }

    pub fn get(&self, token: &str) -> Option<f64> {
        self.weights.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Number of documents the table was built from.
    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn corpus() -> Vec<&'static str> {
        vec![
            "kitchen ceiling light.kitchen_ceiling kitchen light",
            "kitchen island light.kitchen_island kitchen light",
            "whiskey light.whiskey bar light",
            "porch light.porch light",
            "hallway motion binary_sensor.hallway_motion binary_sensor",
            "outside temperature sensor.outside_temperature sensor",
            "garage door cover.garage_door garage cover",
            "desk fan fan.desk office fan",
        ]
    }

    #[test]
    fn rare_tokens_outweigh_common_ones() {
        let idf = TokenIdf::from_corpus(corpus());
        // "whiskey" appears in one document, "light" in four.
        assert!(idf.weight("whiskey") > idf.weight("light"));
        assert!(idf.weight("kitchen") >= idf.weight("light"));
    }

    #[test]
    fn monotonic_in_document_frequency() {
        let docs = corpus();
        let idf = TokenIdf::from_corpus(docs.iter().copied());

        let df = |token: &str| {
            docs.iter()
                .filter(|d| tokenize(d).iter().any(|t| t == token))
                .count()
        };

        let tokens: Vec<&str> = idf.iter().map(|(t, _)| t).collect();
        for a in &tokens {
            for b in &tokens {
                if df(a) < df(b) {
                    assert!(idf.weight(a) >= idf.weight(b), "{a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn weights_are_clamped() {
        let idf = TokenIdf::from_corpus(corpus());
        assert!(!idf.is_empty());
        for (token, weight) in idf.iter() {
            assert!(
                (TokenIdf::MIN_WEIGHT..=TokenIdf::MAX_WEIGHT).contains(&weight),
                "{token} -> {weight}"
            );
        }
    }

    #[test]
    fn ubiquitous_token_hits_the_floor() {
        let idf = TokenIdf::from_corpus(["alpha light", "beta light", "gamma light"]);
        assert!((idf.weight("light") - TokenIdf::MIN_WEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_token_defaults_to_one() {
        let idf = TokenIdf::from_corpus(corpus());
        assert!(idf.get("zeppelin").is_none());
        assert!((idf.weight("zeppelin") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn repeated_token_in_one_document_counts_once() {
        let idf = TokenIdf::from_corpus(["lamp lamp lamp", "desk", "chair", "sofa"]);
        // df("lamp") = 1 of 4 documents -> log2(4) = 2
        assert!((idf.weight("lamp") - 2.0).abs() < 1e-9);
        assert_eq!(idf.documents(), 4);
    }
}
