// ── Intent types produced by the command detectors ──
//
// Detectors never execute anything. They hand back one of these values
// and the transport layer decides how to call the backend.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::entity::domain_of;

/// Backend service invoked against an entity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Service {
    TurnOn,
    TurnOff,
}

impl Service {
    /// Map a spoken `on` / `off` to a service.
    pub fn from_switch_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "on" => Some(Self::TurnOn),
            "off" => Some(Self::TurnOff),
            _ => None,
        }
    }

    /// Past-tense verb for user-facing confirmations.
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::TurnOn => "on",
            Self::TurnOff => "off",
        }
    }

    /// Fully-qualified service path for an entity (`light.turn_on`).
    pub fn qualified_for(self, entity_id: &str) -> String {
        let domain = domain_of(entity_id);
        if domain.is_empty() {
            format!("homeassistant.{self}")
        } else {
            format!("{domain}.{self}")
        }
    }
}

/// Extra payload attached to a service call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness_pct: Option<u8>,
}

/// A single service call against one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionIntent {
    pub service: Service,
    pub entity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ServiceData>,
}

impl ActionIntent {
    pub fn new(service: Service, entity_id: impl Into<String>) -> Self {
        Self {
            service,
            entity_id: entity_id.into(),
            data: None,
        }
    }

    pub fn brightness(entity_id: impl Into<String>, pct: u8) -> Self {
        Self {
            service: Service::TurnOn,
            entity_id: entity_id.into(),
            data: Some(ServiceData {
                brightness_pct: Some(pct),
            }),
        }
    }
}

/// One or more actions plus the confirmation shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub actions: Vec<ActionIntent>,
    pub success_message: String,
}

impl ActionPlan {
    /// Id of the first targeted entity, used to seed per-user memory.
    pub fn primary_entity_id(&self) -> Option<&str> {
        self.actions.first().map(|a| a.entity_id.as_str())
    }
}

/// Result of a state-query detector hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateQuery {
    pub entity_id: String,
    pub target: String,
}

/// Anything a matcher strategy can produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Intent {
    StateQuery(StateQuery),
    Plan(ActionPlan),
}

/// Join display names as "A", "A and B", or "A, B and C".
pub fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    match names {
        [] => String::new(),
        [only] => only.as_ref().to_owned(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn service_names_are_snake_case() {
        assert_eq!(Service::TurnOn.to_string(), "turn_on");
        assert_eq!("turn_off".parse::<Service>().unwrap(), Service::TurnOff);
        assert_eq!(Service::TurnOn.qualified_for("light.couch"), "light.turn_on");
    }

    #[test]
    fn switch_word_parsing() {
        assert_eq!(Service::from_switch_word("ON"), Some(Service::TurnOn));
        assert_eq!(Service::from_switch_word("off"), Some(Service::TurnOff));
        assert_eq!(Service::from_switch_word("up"), None);
    }

    #[test]
    fn brightness_action_serializes_data() {
        let action = ActionIntent::brightness("light.couch", 44);
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "service": "turn_on",
                "entity_id": "light.couch",
                "data": { "brightness_pct": 44 }
            })
        );
    }

    #[test]
    fn names_are_joined_naturally() {
        assert_eq!(join_names::<&str>(&[]), "");
        assert_eq!(join_names(&["Couch"]), "Couch");
        assert_eq!(join_names(&["Couch", "Wall"]), "Couch and Wall");
        assert_eq!(join_names(&["A", "B", "C"]), "A, B and C");
    }
}
