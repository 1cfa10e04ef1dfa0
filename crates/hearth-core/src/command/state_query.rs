// ── State-query detector ──

use std::sync::LazyLock;

use regex::Regex;

use super::{CommandContext, IntentMatcher};
use crate::model::{Intent, StateQuery, domain};

/// Preference order when resolving the subject of a status question.
pub const STATE_QUERY_DOMAINS: &[&str] = &[
    domain::LIGHT,
    domain::SWITCH,
    domain::FAN,
    domain::COVER,
    domain::CLIMATE,
    domain::MEDIA_PLAYER,
    domain::SENSOR,
];

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^status\s+(?:of\s+)?(.+)$",
        r"(?i)^what(?:'s|\s+is)\s+the\s+(?:status|state)\s+of\s+(.+)$",
        r"(?i)^state\s+(?:of\s+)?(.+)$",
        r"(?i)^check\s+(?:on\s+)?(.+)$",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// `status X`, `what's the state of X`, `state X`, `check X`.
pub fn detect_state_query(text: &str, ctx: &CommandContext<'_>) -> Option<StateQuery> {
    let text = text.trim();
    let target = PATTERNS
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().trim_end_matches('?').trim_end().to_owned())?;
    if target.is_empty() {
        return None;
    }

    let entity_id = ctx.select(&target, STATE_QUERY_DOMAINS)?;
    Some(StateQuery { entity_id, target })
}

pub struct StateQueryMatcher;

impl IntentMatcher for StateQueryMatcher {
    fn name(&self) -> &'static str {
        "state_query"
    }

    fn attempt(&self, text: &str, ctx: &CommandContext<'_>) -> Option<Intent> {
        detect_state_query(text, ctx).map(Intent::StateQuery)
    }
}
