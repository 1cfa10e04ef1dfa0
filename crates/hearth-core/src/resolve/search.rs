// ── Candidate search ──
//
// Scores the whole search index for one query, keeps positive scores,
// ranks them and falls back to id substring matching for lone rare tokens.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::score::{ScoreOptions, score};
use super::tokenize::query_tokens;
use crate::model::Entity;
use crate::store::RegistrySnapshot;

/// Fixed score of a substring-fallback hit.
pub const FALLBACK_SCORE: f64 = 0.5;

/// An entity paired with the score it earned for one query.
#[derive(Debug, Clone)]
pub struct Candidate {
    entity: Arc<Entity>,
    score: f64,
}

impl Candidate {
    pub fn new(entity: Arc<Entity>, score: f64) -> Self {
        Self { entity, score }
    }

    pub fn entity(&self) -> &Arc<Entity> {
        &self.entity
    }

    pub fn entity_id(&self) -> &str {
        &self.entity.entity_id
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Knobs for [`find_candidates`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions<'a> {
    /// Domains that earn the preference bonus.
    pub preferred_domains: &'a [&'a str],
    /// When non-empty, only these domains are considered at all.
    pub restrict_domains: &'a [&'a str],
}

impl SearchOptions<'_> {
    fn admits(&self, domain: &str) -> bool {
        self.restrict_domains.is_empty() || self.restrict_domains.contains(&domain)
    }
}

/// Rank registry entities for `query`, best first, at most `limit` long.
pub fn find_candidates(
    snapshot: &RegistrySnapshot,
    query: &str,
    limit: usize,
    options: &SearchOptions<'_>,
) -> Vec<Candidate> {
    let tokens = query_tokens(query);
    if tokens.is_empty() || limit == 0 {
        return Vec::new();
    }

    let score_options = ScoreOptions {
        preferred_domains: options.preferred_domains,
        token_idf: snapshot.token_idf(),
    };

    let mut ranked: Vec<Candidate> = snapshot
        .search_index()
        .iter()
        .filter(|entry| options.admits(entry.domain()))
        .filter_map(|entry| {
            let s = score(entry, &tokens, &score_options);
            (s > 0.0).then(|| Candidate::new(Arc::clone(&entry.entity), s))
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.entity.name.cmp(&b.entity.name))
            .then_with(|| a.entity.entity_id.cmp(&b.entity.entity_id))
    });

    let mut seen: HashSet<String> = HashSet::new();
    ranked.retain(|c| seen.insert(c.entity.entity_id.clone()));
    ranked.truncate(limit);

    if ranked.is_empty() {
        if let [only] = tokens.as_slice() {
            let fallback: Vec<Candidate> = snapshot
                .search_index()
                .iter()
                .filter(|entry| options.admits(entry.domain()))
                .filter(|entry| entry.entity_id().to_lowercase().contains(only.as_str()))
                .take(limit)
                .map(|entry| Candidate::new(Arc::clone(&entry.entity), FALLBACK_SCORE))
                .collect();
            debug!(token = %only, hits = fallback.len(), "substring fallback");
            return fallback;
        }
    }

    ranked
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry() -> RegistrySnapshot {
        RegistrySnapshot::from_entities([
            Entity::new("light.kitchen_ceiling", "Kitchen Ceiling").with_area("Kitchen"),
            Entity::new("light.kitchen_island", "Kitchen Island").with_area("Kitchen"),
            Entity::new("switch.kitchen_kettle", "Kettle").with_area("Kitchen"),
            Entity::new("light.whiskey", "Whiskey"),
            Entity::new("light.porch", "Porch"),
            Entity::new("sensor.zb_0x00158d", "Hallway Motion"),
        ])
    }

    fn ids(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(Candidate::entity_id).collect()
    }

    #[test]
    fn empty_after_stop_words() {
        let snap = registry();
        assert!(find_candidates(&snap, "turn on the", 5, &SearchOptions::default()).is_empty());
        assert!(find_candidates(&snap, "", 5, &SearchOptions::default()).is_empty());
    }

    #[test]
    fn specific_name_ranks_first() {
        let snap = registry();
        let found = find_candidates(&snap, "kitchen island", 5, &SearchOptions::default());
        assert_eq!(found[0].entity_id(), "light.kitchen_island");
        assert!(found.iter().all(|c| c.score() > 0.0));
    }

    #[test]
    fn ties_break_by_name() {
        let snap = registry();
        // "kitchen" hits area and id tokens of all three kitchen entities.
        let found = find_candidates(&snap, "kitchen", 5, &SearchOptions::default());
        assert_eq!(found.len(), 3);
        for pair in found.windows(2) {
            let [a, b] = pair else { unreachable!() };
            let order = b
                .score()
                .total_cmp(&a.score())
                .then_with(|| a.entity().name.cmp(&b.entity().name));
            assert!(order.is_le());
        }
    }

    #[test]
    fn ranking_is_stable_across_calls() {
        let snap = registry();
        let options = SearchOptions {
            preferred_domains: &["light"],
            ..SearchOptions::default()
        };
        let first = find_candidates(&snap, "kitchen light", 5, &options);
        for _ in 0..5 {
            let again = find_candidates(&snap, "kitchen light", 5, &options);
            assert_eq!(ids(&again), ids(&first));
        }
    }

    #[test]
    fn limit_truncates() {
        let snap = registry();
        let found = find_candidates(&snap, "kitchen", 2, &SearchOptions::default());
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn restrict_domains_excludes_others() {
        let snap = registry();
        let options = SearchOptions {
            restrict_domains: &["switch"],
            ..SearchOptions::default()
        };
        let found = find_candidates(&snap, "kitchen", 5, &options);
        assert_eq!(ids(&found), vec!["switch.kitchen_kettle"]);
    }

    #[test]
    fn single_rare_token_falls_back_to_id_substring() {
        let snap = registry();
        let found = find_candidates(&snap, "0x00158", 5, &SearchOptions::default());
        assert_eq!(ids(&found), vec!["sensor.zb_0x00158d"]);
        assert!((found[0].score() - FALLBACK_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn no_fallback_for_multiple_tokens() {
        let snap = registry();
        assert!(find_candidates(&snap, "0x00158 zzz", 5, &SearchOptions::default()).is_empty());
    }
}
