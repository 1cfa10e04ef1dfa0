// ── Immutable registry snapshot ──
//
// Every derived index is built in one pass from the same filtered entity
// list. A snapshot is never mutated; a refresh builds a new one and the
// `RegistryStore` swaps it in.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::model::Entity;
use crate::resolve::idf::TokenIdf;
use crate::resolve::tokenize::tokenize;

/// Lean per-entity projection holding everything the scorer reads.
#[derive(Debug, Clone)]
pub struct SearchEntry {
    pub entity: Arc<Entity>,
    /// Lowercased display name.
    pub name_lower: String,
    /// Id without domain, underscores replaced by spaces.
    pub id_suffix: String,
    pub name_tokens: Vec<String>,
    pub id_tokens: Vec<String>,
    pub area_tokens: Vec<String>,
}

impl SearchEntry {
    pub fn from_entity(entity: Arc<Entity>) -> Self {
        let name_lower = entity.name.to_lowercase();
        let id_suffix = entity.object_id().replace('_', " ").to_lowercase();
        let name_tokens = tokenize(&entity.name);
        let id_tokens = tokenize(&entity.entity_id);
        let area_tokens = entity.area.as_deref().map(tokenize).unwrap_or_default();
        Self {
            entity,
            name_lower,
            id_suffix,
            name_tokens,
            id_tokens,
            area_tokens,
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity.entity_id
    }

    pub fn domain(&self) -> &str {
        &self.entity.domain
    }

    pub fn normalized(&self) -> &str {
        &self.entity.normalized
    }
}

/// A complete, self-consistent view of the registry at one point in time.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    entities: Vec<Arc<Entity>>,
    grouped: IndexMap<String, Vec<Arc<Entity>>>,
    search_index: Vec<SearchEntry>,
    entity_map: HashMap<String, Arc<Entity>>,
    area_index: HashMap<String, Vec<Arc<Entity>>>,
    token_idf: TokenIdf,
    last_updated: Option<DateTime<Utc>>,
}

impl RegistrySnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from raw entities, admitting every domain.
    pub fn from_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        Self::build(entities, &[], Some(Utc::now()))
    }

    /// Build a snapshot, keeping only entities whose domain is listed in
    /// `include_domains` (an empty list admits everything). Later
    /// duplicates of an `entity_id` are dropped.
    pub fn build(
        entities: impl IntoIterator<Item = Entity>,
        include_domains: &[String],
        last_updated: Option<DateTime<Utc>>,
    ) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let filtered: Vec<Arc<Entity>> = entities
            .into_iter()
            .filter(|e| include_domains.is_empty() || include_domains.contains(&e.domain))
            .filter(|e| seen.insert(e.entity_id.clone()))
            .map(Arc::new)
            .collect();

        let mut grouped: IndexMap<String, Vec<Arc<Entity>>> = IndexMap::new();
        let mut entity_map = HashMap::with_capacity(filtered.len());
        let mut area_index: HashMap<String, Vec<Arc<Entity>>> = HashMap::new();
        let mut search_index = Vec::with_capacity(filtered.len());

        for entity in &filtered {
            grouped
                .entry(entity.domain.clone())
                .or_default()
                .push(Arc::clone(entity));
            entity_map.insert(entity.entity_id.clone(), Arc::clone(entity));
            if let Some(area) = entity.area.as_deref() {
                area_index
                    .entry(area.to_lowercase())
                    .or_default()
                    .push(Arc::clone(entity));
            }
            search_index.push(SearchEntry::from_entity(Arc::clone(entity)));
        }

        let token_idf = TokenIdf::from_corpus(search_index.iter().map(SearchEntry::normalized));

        Self {
            entities: filtered,
            grouped,
            search_index,
            entity_map,
            area_index,
            token_idf,
            last_updated,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn entities(&self) -> &[Arc<Entity>] {
        &self.entities
    }

    pub fn grouped(&self) -> &IndexMap<String, Vec<Arc<Entity>>> {
        &self.grouped
    }

    /// Entities of one domain, in registry order.
    pub fn in_domain(&self, domain: &str) -> &[Arc<Entity>] {
        self.grouped.get(domain).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn search_index(&self) -> &[SearchEntry] {
        &self.search_index
    }

    pub fn entity_by_id(&self, entity_id: &str) -> Option<&Arc<Entity>> {
        self.entity_map.get(entity_id)
    }

    /// Entities located in `area` (case-insensitive).
    pub fn in_area(&self, area: &str) -> &[Arc<Entity>] {
        self.area_index
            .get(&area.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn areas(&self) -> impl Iterator<Item = &str> {
        self.area_index.keys().map(String::as_str)
    }

    pub fn token_idf(&self) -> &TokenIdf {
        &self.token_idf
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
