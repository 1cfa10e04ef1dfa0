// ── Command detectors ──
//
// Pattern matchers that turn an utterance into an intent. Each detector is
// a pure function of the text and a `CommandContext`; the router tries
// them in a fixed order and the first hit wins.

mod brightness;
mod direct;
mod pronoun;
mod router;
mod state_query;

use std::sync::Arc;

use crate::model::{Entity, Intent};
use crate::resolve::{AliasTable, SelectOptions, select_entity_id};
use crate::store::{LastEntityLookup, RegistrySnapshot};

pub use brightness::{
    BRIGHTNESS_DOMAINS, BrightnessMatcher, FILLER_TOKENS, detect_brightness_command,
};
pub use direct::{DIRECT_DOMAINS, DirectMatcher, detect_direct_command};
pub use pronoun::{PronounMatcher, detect_pronoun_command};
pub use router::{CommandRouter, Dispatch};
pub use state_query::{STATE_QUERY_DOMAINS, StateQueryMatcher, detect_state_query};

/// Words that stand in for the entity the user mentioned last.
pub const PRONOUNS: &[&str] = &["it", "them", "this", "that"];

/// Everything a detector may consult. All of it is read-only.
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    pub snapshot: &'a RegistrySnapshot,
    pub aliases: &'a AliasTable,
    pub memory: &'a dyn LastEntityLookup,
    pub user: &'a str,
    pub min_score: f64,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        snapshot: &'a RegistrySnapshot,
        aliases: &'a AliasTable,
        memory: &'a dyn LastEntityLookup,
        user: &'a str,
    ) -> Self {
        Self {
            snapshot,
            aliases,
            memory,
            user,
            min_score: SelectOptions::DEFAULT_MIN_SCORE,
        }
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Selector call with this context's threshold.
    pub fn select(&self, text: &str, preferred_domains: &[&str]) -> Option<String> {
        let options = SelectOptions {
            preferred_domains,
            min_score: self.min_score,
            ..SelectOptions::default()
        };
        select_entity_id(self.snapshot, self.aliases, text, &options)
    }

    /// Select and require the entity to exist in the snapshot.
    pub fn resolve(&self, text: &str, preferred_domains: &[&str]) -> Option<Arc<Entity>> {
        let entity_id = self.select(text, preferred_domains)?;
        self.snapshot.entity_by_id(&entity_id).cloned()
    }

    pub fn last_entity_id(&self) -> Option<String> {
        self.memory.last_entity_id(self.user)
    }

    pub fn last_entity(&self) -> Option<Arc<Entity>> {
        let entity_id = self.last_entity_id()?;
        self.snapshot.entity_by_id(&entity_id).cloned()
    }
}

/// One strategy in the router's ordered list.
pub trait IntentMatcher: Send + Sync {
    fn name(&self) -> &'static str;

    fn attempt(&self, text: &str, ctx: &CommandContext<'_>) -> Option<Intent>;
}

/// Trim, fold curly apostrophes, collapse whitespace and drop trailing
/// sentence punctuation.
pub fn normalize_utterance(text: &str) -> String {
    let folded = text.replace(['\u{2019}', '\u{2018}'], "'");
    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(['.', '!', '?'])
        .trim_end()
        .to_owned()
}

pub fn is_pronoun(segment: &str) -> bool {
    let lowered = segment.trim().to_lowercase();
    PRONOUNS.contains(&lowered.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utterance_normalization() {
        assert_eq!(
            normalize_utterance("  What\u{2019}s the   status of the porch?! "),
            "What's the status of the porch"
        );
        assert_eq!(normalize_utterance("turn it on."), "turn it on");
    }

    #[test]
    fn pronoun_detection() {
        assert!(is_pronoun(" It "));
        assert!(is_pronoun("them"));
        assert!(!is_pronoun("item"));
    }
}
