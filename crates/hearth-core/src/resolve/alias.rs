// ── Alias table ──
//
// Admin-curated exact phrases that override fuzzy scoring. The table is
// kept behind a `TtlCache` so edits to the alias document are picked up
// without a restart.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::error::CoreError;
use crate::store::TtlCache;

/// Default alias document reload cadence.
pub const DEFAULT_ALIAS_TTL: Duration = Duration::from_secs(60);

/// Exact phrase -> entity id overrides. Keys are lowercased and trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical key form of a phrase.
    pub fn normalize_phrase(phrase: &str) -> String {
        phrase.trim().to_lowercase()
    }

    pub fn insert(&mut self, phrase: &str, entity_id: impl Into<String>) {
        let key = Self::normalize_phrase(phrase);
        let entity_id: String = entity_id.into();
        if !key.is_empty() {
            self.entries.insert(key, entity_id.trim().to_owned());
        }
    }

    /// Exact lookup after normalizing `phrase`.
    pub fn lookup(&self, phrase: &str) -> Option<&str> {
        self.entries
            .get(&Self::normalize_phrase(phrase))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (phrase, entity_id) in iter {
            table.insert(phrase.as_ref(), entity_id);
        }
        table
    }
}

/// Alias table with lazy, TTL-driven reloads from an external source.
pub struct AliasStore {
    cache: TtlCache<AliasTable>,
}

impl AliasStore {
    /// Store that loads through `loader` on first use and every `ttl`.
    pub fn new(
        ttl: Duration,
        loader: impl Fn() -> Result<AliasTable, CoreError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            cache: TtlCache::new(ttl, loader),
        }
    }

    /// Store seeded with an already loaded `table`, reloading every `ttl`.
    pub fn preloaded(
        table: AliasTable,
        ttl: Duration,
        loader: impl Fn() -> Result<AliasTable, CoreError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            cache: TtlCache::preloaded(table, ttl, loader),
        }
    }

    /// Store that always serves `table`.
    pub fn fixed(table: AliasTable) -> Self {
        let reload = table.clone();
        Self {
            cache: TtlCache::preloaded(table, Duration::MAX, move || Ok(reload.clone())),
        }
    }

    /// The current table, reloading if stale.
    pub fn current(&self) -> Arc<AliasTable> {
        self.cache.get()
    }

    /// Force a reload now.
    pub fn reload(&self) -> Arc<AliasTable> {
        self.cache.refresh()
    }

    pub fn ttl(&self) -> Duration {
        self.cache.ttl()
    }
}
