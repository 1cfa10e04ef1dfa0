// ── Registry store ──
//
// Immutable snapshots swapped atomically, plus the small caches that sit
// beside them (alias reload cache, per-user memory).

mod cache;
mod memory;
mod registry;
mod snapshot;

pub use cache::TtlCache;
pub use memory::{LastEntityLookup, NoMemory, RecentEntities};
pub use registry::RegistryStore;
pub use snapshot::{RegistrySnapshot, SearchEntry};
