// hearth-core: Entity resolution and intent detection over a smart-home registry.

pub mod command;
pub mod convert;
pub mod error;
pub mod model;
pub mod resolve;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{CommandContext, CommandRouter, Dispatch, IntentMatcher};
pub use convert::{HaState, RegistryCache};
pub use error::CoreError;
pub use store::{
    LastEntityLookup, NoMemory, RecentEntities, RegistrySnapshot, RegistryStore, TtlCache,
};

pub use model::{ActionIntent, ActionPlan, Entity, Intent, Service, ServiceData, StateQuery};
pub use resolve::{
    AliasStore, AliasTable, Candidate, SearchOptions, SelectOptions, SnippetOptions,
    build_relevant_entities_snippet, find_candidates, select_entity_id, split_targets, tokenize,
};
