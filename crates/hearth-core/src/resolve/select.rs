// ── Entity selector ──
//
// Alias first, then the best fuzzy candidate if it clears the threshold.

use tracing::debug;

use super::alias::AliasTable;
use super::search::{SearchOptions, find_candidates};
use crate::store::RegistrySnapshot;

/// Knobs for [`select_entity_id`].
#[derive(Debug, Clone, Copy)]
pub struct SelectOptions<'a> {
    pub preferred_domains: &'a [&'a str],
    pub limit: usize,
    pub min_score: f64,
}

impl SelectOptions<'_> {
    pub const DEFAULT_LIMIT: usize = 5;
    pub const DEFAULT_MIN_SCORE: f64 = 1.0;
}

impl Default for SelectOptions<'_> {
    fn default() -> Self {
        Self {
            preferred_domains: &[],
            limit: Self::DEFAULT_LIMIT,
            min_score: Self::DEFAULT_MIN_SCORE,
        }
    }
}

impl<'a> SelectOptions<'a> {
    pub fn preferring(preferred_domains: &'a [&'a str]) -> Self {
        Self {
            preferred_domains,
            ..Self::default()
        }
    }
}

/// Resolve `text` to a single entity id.
///
/// An alias hit always wins, whatever the scorer would rank first.
/// `None` means "unresolved" and is not an error.
pub fn select_entity_id(
    snapshot: &RegistrySnapshot,
    aliases: &AliasTable,
    text: &str,
    options: &SelectOptions<'_>,
) -> Option<String> {
    if let Some(entity_id) = aliases.lookup(text) {
        debug!(phrase = text, entity_id, "alias match");
        return Some(entity_id.to_owned());
    }

    let search = SearchOptions {
        preferred_domains: options.preferred_domains,
        ..SearchOptions::default()
    };
    let top = find_candidates(snapshot, text, options.limit, &search)
        .into_iter()
        .next()?;

    if top.score() >= options.min_score {
        debug!(phrase = text, entity_id = top.entity_id(), score = top.score(), "fuzzy match");
        Some(top.entity_id().to_owned())
    } else {
        debug!(phrase = text, best = top.score(), "best candidate below threshold");
        None
    }
}
