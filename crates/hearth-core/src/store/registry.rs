// ── Registry store ──
//
// Owns the current snapshot behind an `ArcSwap`. Readers grab an `Arc`
// once per request and keep a consistent view even if a refresh lands
// mid-request; writers publish a fully built replacement.

use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use tracing::info;

use super::snapshot::RegistrySnapshot;
use crate::convert::RegistryCache;
use crate::model::Entity;

/// Injectable holder of the current [`RegistrySnapshot`].
pub struct RegistryStore {
    current: ArcSwap<RegistrySnapshot>,
    include_domains: Vec<String>,
}

impl RegistryStore {
    /// An empty store admitting every domain.
    pub fn new() -> Self {
        Self::with_include_domains(Vec::new())
    }

    /// An empty store that filters snapshots to `include_domains`.
    pub fn with_include_domains(include_domains: Vec<String>) -> Self {
        Self {
            current: ArcSwap::from_pointee(RegistrySnapshot::empty()),
            include_domains,
        }
    }

    /// The snapshot current at the time of the call.
    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.current.load_full()
    }

    /// Atomically replace the current snapshot.
    pub fn publish(&self, snapshot: RegistrySnapshot) -> Arc<RegistrySnapshot> {
        let snapshot = Arc::new(snapshot);
        info!(
            entities = snapshot.len(),
            tokens = snapshot.token_idf().len(),
            "registry snapshot published"
        );
        self.current.store(Arc::clone(&snapshot));
        snapshot
    }

    /// Build a snapshot from `entities` using this store's domain filter
    /// and publish it.
    pub fn replace_entities(
        &self,
        entities: impl IntoIterator<Item = Entity>,
        last_updated: Option<DateTime<Utc>>,
    ) -> Arc<RegistrySnapshot> {
        let snapshot = RegistrySnapshot::build(
            entities,
            &self.include_domains,
            last_updated.or_else(|| Some(Utc::now())),
        );
        self.publish(snapshot)
    }

    /// Publish the contents of a decoded registry cache document.
    pub fn apply_cache(&self, cache: RegistryCache) -> Arc<RegistrySnapshot> {
        let last_updated = cache.last_updated;
        self.replace_entities(cache.into_entities(), last_updated)
    }

    pub fn entity_by_id(&self, entity_id: &str) -> Option<Arc<Entity>> {
        self.current.load().entity_by_id(entity_id).cloned()
    }

    pub fn include_domains(&self) -> &[String] {
        &self.include_domains
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.current.load().last_updated()
    }

    /// How old the current snapshot is, or `None` if it has no timestamp.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_updated().map(|t| Utc::now() - t)
    }
}

impl Default for RegistryStore {
    fn default() -> Self {
        Self::new()
    }
}
