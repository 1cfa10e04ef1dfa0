// ── Relevant-entity snippet ──
//
// Text block handed to a downstream planner: the best-scoring entities for
// the request first, then a per-domain backfill so the planner still sees
// what exists when scoring finds little.

use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::sync::Arc;

use super::search::{SearchOptions, find_candidates};
use crate::model::Entity;
use crate::store::RegistrySnapshot;

pub const DEFAULT_SNIPPET_LIMIT: usize = 40;
pub const DEFAULT_SNIPPET_PER_DOMAIN: usize = 8;
pub const DEFAULT_SNIPPET_DOMAINS: &[&str] = &[
    "light",
    "switch",
    "fan",
    "cover",
    "climate",
    "media_player",
];

/// Shape of the planner snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetOptions {
    /// Domains considered, in backfill order. Empty means every domain,
    /// with backfill following registry order.
    pub domains: Vec<String>,
    /// Overall entity cap.
    pub limit: usize,
    /// Cap per domain.
    pub per_domain: usize,
}

impl Default for SnippetOptions {
    fn default() -> Self {
        Self {
            domains: DEFAULT_SNIPPET_DOMAINS.iter().map(|d| (*d).to_owned()).collect(),
            limit: DEFAULT_SNIPPET_LIMIT,
            per_domain: DEFAULT_SNIPPET_PER_DOMAIN,
        }
    }
}

/// Collect the entities a planner should see for `text`, best first.
pub fn relevant_entities(
    snapshot: &RegistrySnapshot,
    text: &str,
    options: &SnippetOptions,
) -> Vec<Arc<Entity>> {
    let domains: Vec<&str> = options.domains.iter().map(String::as_str).collect();
    let search = SearchOptions {
        preferred_domains: &domains,
        restrict_domains: &domains,
    };

    let mut picked: Vec<Arc<Entity>> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut per_domain: HashMap<String, usize> = HashMap::new();

    let mut take = |entity: &Arc<Entity>, picked: &mut Vec<Arc<Entity>>| -> bool {
        if picked.len() >= options.limit {
            return false;
        }
        let count = per_domain.entry(entity.domain.clone()).or_insert(0);
        if *count >= options.per_domain || !seen.insert(entity.entity_id.clone()) {
            return true;
        }
        *count += 1;
        picked.push(Arc::clone(entity));
        true
    };

    for candidate in find_candidates(snapshot, text, options.limit, &search) {
        if !take(candidate.entity(), &mut picked) {
            return picked;
        }
    }

    let backfill_domains: Vec<&str> = if domains.is_empty() {
        snapshot.grouped().keys().map(String::as_str).collect()
    } else {
        domains.clone()
    };
    for domain in backfill_domains {
        for entity in snapshot.in_domain(domain) {
            if !take(entity, &mut picked) {
                return picked;
            }
        }
    }

    picked
}

/// Render [`relevant_entities`] as a planner-ready text block.
pub fn build_relevant_entities_snippet(
    snapshot: &RegistrySnapshot,
    text: &str,
    options: &SnippetOptions,
) -> String {
    let entities = relevant_entities(snapshot, text, options);
    if entities.is_empty() {
        return "Relevant entities: none".to_owned();
    }

    let mut out = String::from("Relevant entities:");
    for entity in &entities {
        let _ = write!(out, "\n- {} \"{}\"", entity.entity_id, entity.name);
        if let Some(area) = entity.area.as_deref() {
            let _ = write!(out, " area={area}");
        }
        if !entity.state.is_empty() {
            let _ = write!(out, " state={}", entity.state);
        }
        if entity.supports_brightness {
            out.push_str(" dimmable");
        }
    }
    out
}
