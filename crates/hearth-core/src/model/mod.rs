// ── Domain model ──

pub mod entity;
pub mod intent;

pub use entity::{Entity, domain, domain_of, normalized_text, object_id_of};
pub use intent::{
    ActionIntent, ActionPlan, Intent, Service, ServiceData, StateQuery, join_names,
};
