// ── Scoring engine ──
//
// Additive lexical signals for one entity against one tokenized query.
// Pure: the same entry, tokens and options always give the same score.

use std::collections::HashSet;

use super::idf::TokenIdf;
use crate::store::SearchEntry;

pub const EXACT_NAME_BONUS: f64 = 100.0;
pub const EXACT_ID_BONUS: f64 = 80.0;
pub const AREA_TOKEN_WEIGHT: f64 = 5.0;
pub const NAME_TOKEN_WEIGHT: f64 = 3.0;
pub const ID_TOKEN_WEIGHT: f64 = 1.0;
pub const RUN_TOKEN_BONUS: f64 = 2.0;
pub const DOMAIN_BONUS: f64 = 2.0;
pub const COMPLETENESS_WEIGHT: f64 = 5.0;

/// Inputs to [`score`] besides the entity and the query.
#[derive(Debug, Clone, Copy)]
pub struct ScoreOptions<'a> {
    pub preferred_domains: &'a [&'a str],
    pub token_idf: &'a TokenIdf,
}

impl ScoreOptions<'_> {
    fn prefers(&self, domain: &str) -> bool {
        self.preferred_domains.contains(&domain)
    }
}

/// Score `entry` against `query_tokens`.
///
/// The domain preference only lifts entries that matched lexically, so a
/// preferred domain alone never turns an unrelated entity into a candidate.
#[allow(clippy::cast_precision_loss)]
pub fn score(entry: &SearchEntry, query_tokens: &[String], options: &ScoreOptions<'_>) -> f64 {
    if query_tokens.is_empty() {
        return 0.0;
    }

    let mut total = 0.0;

    let joined = query_tokens.join(" ");
    if joined == entry.name_lower {
        total += EXACT_NAME_BONUS;
    }
    if joined == entry.id_suffix {
        total += EXACT_ID_BONUS;
    }

    let mut matched_name: HashSet<&str> = HashSet::new();
    for token in query_tokens {
        let weight = options.token_idf.weight(token);
        if entry.area_tokens.contains(token) {
            total += AREA_TOKEN_WEIGHT * weight;
        }
        if entry.name_tokens.contains(token) {
            total += NAME_TOKEN_WEIGHT * weight;
            matched_name.insert(token.as_str());
        } else if entry.id_tokens.contains(token) {
            total += ID_TOKEN_WEIGHT * weight;
        }
    }

    let run = longest_name_run(query_tokens, &entry.name_tokens);
    if run >= 2 {
        total += run as f64 * RUN_TOKEN_BONUS;
    }

    let distinct_name: HashSet<&str> = entry.name_tokens.iter().map(String::as_str).collect();
    if !distinct_name.is_empty() && !matched_name.is_empty() {
        total += matched_name.len() as f64 / distinct_name.len() as f64 * COMPLETENESS_WEIGHT;
    }

    if total > 0.0 && options.prefers(entry.domain()) {
        total += DOMAIN_BONUS;
    }

    total
}

/// Longest run of consecutive query tokens that all appear in the name.
fn longest_name_run(query_tokens: &[String], name_tokens: &[String]) -> usize {
    let mut best = 0;
    let mut current = 0;
    for token in query_tokens {
        if name_tokens.contains(token) {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}
