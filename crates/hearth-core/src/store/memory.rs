// ── Per-user "last referenced entity" memory ──
//
// The command layer only ever reads this through `LastEntityLookup`.
// Recording happens in the transport layer after a successful dispatch.

use dashmap::DashMap;

/// Read access to the entity a user referred to most recently.
pub trait LastEntityLookup {
    fn last_entity_id(&self, user: &str) -> Option<String>;
}

impl<F> LastEntityLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn last_entity_id(&self, user: &str) -> Option<String> {
        self(user)
    }
}

/// Lookup that never remembers anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMemory;

impl LastEntityLookup for NoMemory {
    fn last_entity_id(&self, _user: &str) -> Option<String> {
        None
    }
}

/// Concurrent in-process memory keyed by user.
#[derive(Debug, Default)]
pub struct RecentEntities {
    by_user: DashMap<String, String>,
}

impl RecentEntities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember(&self, user: impl Into<String>, entity_id: impl Into<String>) {
        self.by_user.insert(user.into(), entity_id.into());
    }

    pub fn forget(&self, user: &str) -> Option<String> {
        self.by_user.remove(user).map(|(_, id)| id)
    }

    pub fn len(&self) -> usize {
        self.by_user.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }
}

impl LastEntityLookup for RecentEntities {
    fn last_entity_id(&self, user: &str) -> Option<String> {
        self.by_user.get(user).map(|r| r.value().clone())
    }
}
