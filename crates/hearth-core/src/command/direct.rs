// ── Direct on/off detector ──

use std::sync::LazyLock;

use regex::Regex;

use super::{CommandContext, IntentMatcher};
use crate::model::{ActionIntent, ActionPlan, Intent, Service, domain, join_names};
use crate::resolve::split_targets;

pub const DIRECT_DOMAINS: &[&str] = &[domain::LIGHT, domain::SWITCH, domain::FAN, domain::COVER];

static DIRECT_COMMAND: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:turn|switch)\s+(on|off)\s+(.+)$").ok());

/// `turn on X`, `switch off X and Y`.
///
/// All or nothing: if any named target fails to resolve to an entity in
/// the snapshot, no plan is produced.
pub fn detect_direct_command(text: &str, ctx: &CommandContext<'_>) -> Option<ActionPlan> {
    let caps = DIRECT_COMMAND.as_ref()?.captures(text.trim())?;
    let service = Service::from_switch_word(caps.get(1)?.as_str())?;
    let segments = split_targets(caps.get(2)?.as_str());
    if segments.is_empty() {
        return None;
    }

    let entities = segments
        .iter()
        .map(|segment| ctx.resolve(segment, DIRECT_DOMAINS))
        .collect::<Option<Vec<_>>>()?;

    let names: Vec<&str> = entities.iter().map(|e| e.name.as_str()).collect();
    let success_message = format!("Turned {} {}.", service.past_tense(), join_names(&names));
    let actions = entities
        .iter()
        .map(|e| ActionIntent::new(service, e.entity_id.clone()))
        .collect();

    Some(ActionPlan {
        actions,
        success_message,
    })
}

pub struct DirectMatcher;

impl IntentMatcher for DirectMatcher {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn attempt(&self, text: &str, ctx: &CommandContext<'_>) -> Option<Intent> {
        detect_direct_command(text, ctx).map(Intent::Plan)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::Entity;
    use crate::resolve::AliasTable;
    use crate::store::{NoMemory, RegistrySnapshot};
    use pretty_assertions::assert_eq;

    fn registry() -> RegistrySnapshot {
        RegistrySnapshot::from_entities([
            Entity::new("light.couch", "Couch Lamp"),
            Entity::new("switch.coffee_maker", "Coffee Maker"),
            Entity::new("fan.bedroom", "Bedroom Fan"),
        ])
    }

    #[test]
    fn every_target_resolves() {
        let snap = registry();
        let aliases: AliasTable = [("couch", "light.couch")].into_iter().collect();
        let ctx = CommandContext::new(&snap, &aliases, &NoMemory, "sam");

        let plan = detect_direct_command("turn on couch, coffee maker and bedroom fan", &ctx)
            .unwrap();
        assert_eq!(
            plan.actions,
            vec![
                ActionIntent::new(Service::TurnOn, "light.couch"),
                ActionIntent::new(Service::TurnOn, "switch.coffee_maker"),
                ActionIntent::new(Service::TurnOn, "fan.bedroom"),
            ]
        );
        assert_eq!(
            plan.success_message,
            "Turned on Couch Lamp, Coffee Maker and Bedroom Fan."
        );
    }

    #[test]
    fn switch_off_single_target() {
        let snap = registry();
        let aliases = AliasTable::new();
        let ctx = CommandContext::new(&snap, &aliases, &NoMemory, "sam");

        let plan = detect_direct_command("switch off the coffee maker", &ctx).unwrap();
        assert_eq!(plan.actions, vec![ActionIntent::new(Service::TurnOff, "switch.coffee_maker")]);
    }

    #[test]
    fn one_unresolved_target_drops_everything() {
        let snap = registry();
        let aliases: AliasTable = [("couch", "light.couch")].into_iter().collect();
        let ctx = CommandContext::new(&snap, &aliases, &NoMemory, "sam");
        assert!(detect_direct_command("turn on couch and garage door", &ctx).is_none());
    }

    #[test]
    fn alias_to_missing_entity_drops_everything() {
        let snap = registry();
        let aliases: AliasTable = [("couch", "light.couch"), ("porch", "light.porch")]
            .into_iter()
            .collect();
        let ctx = CommandContext::new(&snap, &aliases, &NoMemory, "sam");
        assert!(detect_direct_command("turn off couch and porch", &ctx).is_none());
    }
}
