// ── Brightness detector ──
//
// "set X to N%" in two flavors. Group mode ("all kitchen lights") filters
// every dimmable light by the remaining words. Segment mode resolves each
// named target and refuses to act on a partial resolution.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::{CommandContext, IntentMatcher, is_pronoun};
use crate::model::{ActionIntent, ActionPlan, Entity, Intent, domain, join_names};
use crate::resolve::{split_targets, tokenize};
use crate::resolve::tokenize::is_stop_word;

pub const BRIGHTNESS_DOMAINS: &[&str] = &[domain::LIGHT];

/// Words dropped from a group target before filtering.
pub const FILLER_TOKENS: &[&str] = &["all", "light", "lights", "lamp", "lamps"];

static BRIGHTNESS_COMMAND: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:set|turn|switch|dim|brighten)\s+(.+?)\s+to\s+(-?\d+(?:\.\d+)?)\s*(?:%|percent)?$",
    )
    .ok()
});

pub fn detect_brightness_command(text: &str, ctx: &CommandContext<'_>) -> Option<ActionPlan> {
    let caps = BRIGHTNESS_COMMAND.as_ref()?.captures(text.trim())?;
    let target = caps.get(1)?.as_str().trim();
    let pct = parse_percent(caps.get(2)?.as_str())?;

    let tokens = tokenize(target);
    let targets = if tokens.iter().any(|t| t == "all") {
        group_targets(&tokens, ctx)
    } else {
        segment_targets(target, ctx)?
    };
    if targets.is_empty() {
        return None;
    }

    let success_message = if targets.len() > 2 {
        format!("Set {} lights to {pct}%.", targets.len())
    } else {
        let names: Vec<&str> = targets.iter().map(|e| e.name.as_str()).collect();
        format!("Set {} to {pct}%.", join_names(&names))
    };
    let actions = targets
        .iter()
        .map(|e| ActionIntent::brightness(e.entity_id.clone(), pct))
        .collect();

    Some(ActionPlan {
        actions,
        success_message,
    })
}

/// Parse and clamp a spoken percentage into `0..=100`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_percent(raw: &str) -> Option<u8> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.round().clamp(0.0, 100.0) as u8)
}

fn group_targets(tokens: &[String], ctx: &CommandContext<'_>) -> Vec<Arc<Entity>> {
    let filters: Vec<&str> = tokens
        .iter()
        .map(String::as_str)
        .filter(|t| !FILLER_TOKENS.contains(t) && !is_stop_word(t))
        .collect();

    ctx.snapshot
        .in_domain(domain::LIGHT)
        .iter()
        .filter(|e| e.supports_brightness)
        .filter(|e| filters.iter().all(|f| e.normalized.contains(*f)))
        .cloned()
        .collect()
}

/// `None` when more than one target was named and any of them failed.
fn segment_targets(target: &str, ctx: &CommandContext<'_>) -> Option<Vec<Arc<Entity>>> {
    let segments = split_targets(target);
    let resolved: Vec<Arc<Entity>> = segments
        .iter()
        .filter_map(|segment| {
            if is_pronoun(segment) {
                ctx.last_entity().filter(|e| e.is_in_domain(domain::LIGHT))
            } else {
                ctx.resolve(segment, BRIGHTNESS_DOMAINS)
            }
        })
        .filter(|e| e.supports_brightness)
        .collect();

    if segments.len() > 1 && resolved.len() < segments.len() {
        return None;
    }
    Some(resolved)
}

pub struct BrightnessMatcher;

impl IntentMatcher for BrightnessMatcher {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn attempt(&self, text: &str, ctx: &CommandContext<'_>) -> Option<Intent> {
        detect_brightness_command(text, ctx).map(Intent::Plan)
    }
}
