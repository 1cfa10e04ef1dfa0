// ── Pronoun detector ──
//
// "turn it off", "switch that back on": targets whatever the user named
// last. No scoring is involved.

use std::sync::LazyLock;

use regex::Regex;

use super::{CommandContext, IntentMatcher};
use crate::model::{ActionIntent, ActionPlan, Intent, Service};

static PRONOUN_COMMAND: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:turn|switch)\s+(?:it|them|this|that)\s+(?:back\s+)?(on|off)$").ok()
});

pub fn detect_pronoun_command(text: &str, ctx: &CommandContext<'_>) -> Option<ActionPlan> {
    let caps = PRONOUN_COMMAND.as_ref()?.captures(text.trim())?;
    let service = Service::from_switch_word(caps.get(1)?.as_str())?;
    let entity_id = ctx.last_entity_id()?;

    let label = ctx
        .snapshot
        .entity_by_id(&entity_id)
        .map_or_else(|| entity_id.clone(), |e| e.name.clone());

    Some(ActionPlan {
        actions: vec![ActionIntent::new(service, entity_id)],
        success_message: format!("Turned {label} {}.", service.past_tense()),
    })
}

pub struct PronounMatcher;

impl IntentMatcher for PronounMatcher {
    fn name(&self) -> &'static str {
        "pronoun"
    }

    fn attempt(&self, text: &str, ctx: &CommandContext<'_>) -> Option<Intent> {
        detect_pronoun_command(text, ctx).map(Intent::Plan)
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
        RegistrySnapshot::from_entities([Entity::new("light.couch", "Couch Lamp")])
    }

    fn remembers(id: &'static str) -> impl Fn(&str) -> Option<String> {
        move |_user: &str| Some(id.to_owned())
    }

    #[test]
    fn targets_last_entity() {
        let snap = registry();
        let aliases = AliasTable::new();
        let memory = remembers("light.couch");
        let ctx = CommandContext::new(&snap, &aliases, &memory, "sam");

        let plan = detect_pronoun_command("turn it off", &ctx).unwrap();
        assert_eq!(plan.actions, vec![ActionIntent::new(Service::TurnOff, "light.couch")]);
        assert_eq!(plan.success_message, "Turned Couch Lamp off.");

        let plan = detect_pronoun_command("Switch that back ON", &ctx).unwrap();
        assert_eq!(plan.actions[0].service, Service::TurnOn);
    }

    #[test]
    fn unknown_entity_uses_raw_id_in_message() {
        let snap = registry();
        let aliases = AliasTable::new();
        let memory = remembers("fan.attic");
        let ctx = CommandContext::new(&snap, &aliases, &memory, "sam");

        let plan = detect_pronoun_command("turn them on", &ctx).unwrap();
        assert_eq!(plan.success_message, "Turned fan.attic on.");
    }

    #[test]
    fn no_memory_means_no_match() {
        let snap = registry();
        let aliases = AliasTable::new();
        let ctx = CommandContext::new(&snap, &aliases, &NoMemory, "sam");
        assert!(detect_pronoun_command("turn it on", &ctx).is_none());
    }

    #[test]
    fn other_phrasings_do_not_match() {
        let snap = registry();
        let aliases = AliasTable::new();
        let memory = remembers("light.couch");
        let ctx = CommandContext::new(&snap, &aliases, &memory, "sam");
        assert!(detect_pronoun_command("turn on it", &ctx).is_none());
        assert!(detect_pronoun_command("turn it up", &ctx).is_none());
        assert!(detect_pronoun_command("turn the couch on", &ctx).is_none());
    }
}
