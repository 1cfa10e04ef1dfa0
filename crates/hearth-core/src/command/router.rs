// ── Command router ──
//
// Ordered matcher list with a planner fallback. The first matcher that
// produces an intent wins.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::{
    BrightnessMatcher, CommandContext, DirectMatcher, IntentMatcher, PronounMatcher,
    StateQueryMatcher, normalize_utterance,
};
use crate::model::{ActionPlan, Entity, Intent, StateQuery};
use crate::resolve::{SnippetOptions, build_relevant_entities_snippet};

/// Outcome of routing one utterance.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dispatch {
    StateQuery {
        matcher: &'static str,
        query: StateQuery,
        /// `None` when an alias points at an id missing from the snapshot.
        entity: Option<Arc<Entity>>,
    },
    Plan {
        matcher: &'static str,
        plan: ActionPlan,
    },
    /// Nothing matched; `snippet` is what a planner would be handed.
    Fallback { snippet: String },
}

impl Dispatch {
    pub fn primary_entity_id(&self) -> Option<&str> {
        match self {
            Self::StateQuery { query, .. } => Some(&query.entity_id),
            Self::Plan { plan, .. } => plan.primary_entity_id(),
            Self::Fallback { .. } => None,
        }
    }

    pub fn matcher(&self) -> Option<&'static str> {
        match self {
            Self::StateQuery { matcher, .. } | Self::Plan { matcher, .. } => Some(*matcher),
            Self::Fallback { .. } => None,
        }
    }

    /// Short user-facing reply.
    pub fn reply(&self) -> String {
        match self {
            Self::StateQuery {
                entity: Some(entity),
                ..
            } => {
                let state = if entity.state.is_empty() {
                    "unknown"
                } else {
                    entity.state.as_str()
                };
                format!("{} is {state}.", entity.name)
            }
            Self::StateQuery {
                query,
                entity: None,
                ..
            } => format!("{} is not in the registry.", query.entity_id),
            Self::Plan { plan, .. } => plan.success_message.clone(),
            Self::Fallback { .. } => "No direct match; handing off to the planner.".to_owned(),
        }
    }
}

pub struct CommandRouter {
    matchers: Vec<Box<dyn IntentMatcher>>,
    snippet: SnippetOptions,
}

impl CommandRouter {
    pub fn new(matchers: Vec<Box<dyn IntentMatcher>>) -> Self {
        Self {
            matchers,
            snippet: SnippetOptions::default(),
        }
    }

    /// State query, pronoun, brightness, direct on/off.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(StateQueryMatcher),
            Box::new(PronounMatcher),
            Box::new(BrightnessMatcher),
            Box::new(DirectMatcher),
        ])
    }

    #[must_use]
    pub fn with_snippet_options(mut self, snippet: SnippetOptions) -> Self {
        self.snippet = snippet;
        self
    }

    pub fn matcher_names(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    pub fn dispatch(&self, text: &str, ctx: &CommandContext<'_>) -> Dispatch {
        let text = normalize_utterance(text);

        for matcher in &self.matchers {
            let Some(intent) = matcher.attempt(&text, ctx) else {
                continue;
            };
            debug!(matcher = matcher.name(), utterance = %text, "matched");
            return match intent {
                Intent::StateQuery(query) => {
                    let entity = ctx.snapshot.entity_by_id(&query.entity_id).cloned();
                    Dispatch::StateQuery {
                        matcher: matcher.name(),
                        query,
                        entity,
                    }
                }
                Intent::Plan(plan) => Dispatch::Plan {
                    matcher: matcher.name(),
                    plan,
                },
            };
        }

        debug!(utterance = %text, "no matcher, falling back to planner");
        Dispatch::Fallback {
            snippet: build_relevant_entities_snippet(ctx.snapshot, &text, &self.snippet),
        }
    }
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resolve::AliasTable;
    use crate::store::{NoMemory, RecentEntities, RegistrySnapshot};
    use pretty_assertions::assert_eq;

    fn registry() -> RegistrySnapshot {
        RegistrySnapshot::from_entities([
            Entity::new("light.whiskey", "Whiskey").with_state("on"),
            Entity::new("light.couch", "Couch Lamp")
                .with_state("off")
                .with_brightness(true),
            Entity::new("switch.kettle", "Kettle").with_state("off"),
        ])
    }

    fn aliases() -> AliasTable {
        [("whiskey", "light.whiskey"), ("couch", "light.couch")]
            .into_iter()
            .collect()
    }

    #[test]
    fn standard_order() {
        assert_eq!(
            CommandRouter::standard().matcher_names(),
            vec!["state_query", "pronoun", "brightness", "direct"]
        );
    }

    #[test]
    fn state_query_carries_entity() {
        let snap = registry();
        let aliases = aliases();
        let ctx = CommandContext::new(&snap, &aliases, &NoMemory, "sam");

        let dispatch = CommandRouter::standard().dispatch("What\u{2019}s the status of whiskey?", &ctx);
        assert_eq!(dispatch.matcher(), Some("state_query"));
        assert_eq!(dispatch.primary_entity_id(), Some("light.whiskey"));
        assert_eq!(dispatch.reply(), "Whiskey is on.");
    }

    #[test]
    fn brightness_wins_over_direct() {
        let snap = registry();
        let aliases = aliases();
        let ctx = CommandContext::new(&snap, &aliases, &NoMemory, "sam");

        let dispatch = CommandRouter::standard().dispatch("turn couch to 40%", &ctx);
        assert_eq!(dispatch.matcher(), Some("brightness"));
    }

    #[test]
    fn memory_feeds_pronoun_follow_up() {
        let snap = registry();
        let aliases = aliases();
        let recent = RecentEntities::new();
        let router = CommandRouter::standard();

        let first = {
            let ctx = CommandContext::new(&snap, &aliases, &recent, "sam");
            router.dispatch("turn on the kettle!", &ctx)
        };
        assert_eq!(first.reply(), "Turned on Kettle.");
        recent.remember("sam", first.primary_entity_id().unwrap());

        let ctx = CommandContext::new(&snap, &aliases, &recent, "sam");
        let second = router.dispatch("turn it back off", &ctx);
        assert_eq!(second.matcher(), Some("pronoun"));
        assert_eq!(second.reply(), "Turned Kettle off.");
    }

    #[test]
    fn unmatched_text_falls_back_with_snippet() {
        let snap = registry();
        let aliases = aliases();
        let ctx = CommandContext::new(&snap, &aliases, &NoMemory, "sam");

        let dispatch = CommandRouter::standard().dispatch("make it cozy in here", &ctx);
        let Dispatch::Fallback { snippet } = &dispatch else {
            panic!("expected fallback, got {dispatch:?}");
        };
        assert!(snippet.starts_with("Relevant entities:"));
        assert!(dispatch.primary_entity_id().is_none());
    }

    #[test]
    fn dangling_alias_state_query_has_no_entity() {
        let snap = registry();
        let aliases: AliasTable = [("garage", "cover.garage")].into_iter().collect();
        let ctx = CommandContext::new(&snap, &aliases, &NoMemory, "sam");

        let dispatch = CommandRouter::standard().dispatch("status garage", &ctx);
        assert_eq!(dispatch.reply(), "cover.garage is not in the registry.");
    }
}
