// ── Backend-state-to-domain conversions ──
//
// Bridges raw state objects from the persisted registry cache into
// canonical `Entity` values. Each conversion derives the domain, picks a
// display name, detects brightness capability and builds the normalized
// match text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::model::{Entity, domain, domain_of, normalized_text, object_id_of};

/// One state object as the home-automation backend reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HaState {
    pub entity_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Area name, when the fetcher resolved it from the area registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Area registry id, used only when no area name is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<String>,
}

/// The on-disk registry cache document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryCache {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, alias = "entities")]
    pub states: Vec<HaState>,
}

impl RegistryCache {
    /// Decode a cache document. A bare JSON array of states is accepted too.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(text)?;
        if value.is_array() {
            let states: Vec<HaState> = serde_json::from_value(value)?;
            return Ok(Self {
                last_updated: None,
                states,
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn into_entities(self) -> Vec<Entity> {
        self.states.into_iter().map(Entity::from).collect()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn attr_str<'a>(attributes: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    attributes
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// `living_room_lamp` -> `Living Room Lamp`.
fn humanize(object_id: &str) -> String {
    object_id
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A light dims when it advertises any color mode besides plain on/off,
/// or already reports a brightness value.
fn infer_brightness(domain_name: &str, attributes: &Map<String, Value>) -> bool {
    if domain_name != domain::LIGHT {
        return false;
    }
    if attributes.contains_key("brightness") {
        return true;
    }
    attributes
        .get("supported_color_modes")
        .and_then(Value::as_array)
        .is_some_and(|modes| {
            modes
                .iter()
                .filter_map(Value::as_str)
                .any(|mode| mode != "onoff")
        })
}

// ── State → Entity ─────────────────────────────────────────────────

impl From<HaState> for Entity {
    fn from(raw: HaState) -> Self {
        let domain_name = domain_of(&raw.entity_id).to_owned();
        let name = attr_str(&raw.attributes, "friendly_name")
            .map_or_else(|| humanize(object_id_of(&raw.entity_id)), str::to_owned);
        let area = raw
            .area
            .map(|a| a.trim().to_owned())
            .filter(|a| !a.is_empty())
            .or_else(|| attr_str(&raw.attributes, "area").map(str::to_owned))
            .or_else(|| {
                raw.area_id
                    .as_deref()
                    .or_else(|| attr_str(&raw.attributes, "area_id"))
                    .map(humanize)
                    .filter(|a| !a.is_empty())
            });
        let supports_brightness = infer_brightness(&domain_name, &raw.attributes);
        let normalized = normalized_text(&name, &raw.entity_id, area.as_deref(), &domain_name);

        Entity {
            entity_id: raw.entity_id,
            domain: domain_name,
            name,
            area,
            state: raw.state,
            attributes: raw.attributes,
            supports_brightness,
            normalized,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn state(value: Value) -> HaState {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn friendly_name_and_area_are_used() {
        let entity = Entity::from(state(json!({
            "entity_id": "light.couch",
            "state": "on",
            "area": "Living Room",
            "attributes": {
                "friendly_name": "Couch Lamp",
                "supported_color_modes": ["brightness"]
            }
        })));
        assert_eq!(entity.domain, "light");
        assert_eq!(entity.name, "Couch Lamp");
        assert_eq!(entity.area.as_deref(), Some("Living Room"));
        assert!(entity.supports_brightness);
        assert_eq!(entity.normalized, "couch lamp light.couch living room light");
    }

    #[test]
    fn missing_name_is_humanized_from_id() {
        let entity = Entity::from(state(json!({ "entity_id": "switch.coffee_maker" })));
        assert_eq!(entity.name, "Coffee Maker");
        assert!(!entity.supports_brightness);
    }

    #[test]
    fn onoff_only_light_is_not_dimmable() {
        let entity = Entity::from(state(json!({
            "entity_id": "light.closet",
            "attributes": { "supported_color_modes": ["onoff"] }
        })));
        assert!(!entity.supports_brightness);
    }

    #[test]
    fn brightness_attribute_marks_dimmable() {
        let entity = Entity::from(state(json!({
            "entity_id": "light.desk",
            "attributes": { "brightness": 128 }
        })));
        assert!(entity.supports_brightness);
    }

    #[test]
    fn area_falls_back_to_attribute() {
        let entity = Entity::from(state(json!({
            "entity_id": "fan.ceiling",
            "attributes": { "area": "Bedroom" }
        })));
        assert_eq!(entity.area.as_deref(), Some("Bedroom"));
    }

    #[test]
    fn area_id_is_the_last_resort() {
        let entity = Entity::from(state(json!({
            "entity_id": "light.bunk",
            "area_id": "kids_room"
        })));
        assert_eq!(entity.area.as_deref(), Some("Kids Room"));
        assert!(entity.normalized.contains("kids"));

        let named = Entity::from(state(json!({
            "entity_id": "light.bunk",
            "area": "Nursery",
            "area_id": "kids_room"
        })));
        assert_eq!(named.area.as_deref(), Some("Nursery"));

        let in_attributes = Entity::from(state(json!({
            "entity_id": "light.bunk",
            "attributes": { "area_id": "guest_room" }
        })));
        assert_eq!(in_attributes.area.as_deref(), Some("Guest Room"));
    }

    #[test]
    fn cache_accepts_document_and_bare_array() {
        let doc = RegistryCache::from_json(
            r#"{"last_updated":"2026-01-02T03:04:05Z","states":[{"entity_id":"light.a"}]}"#,
        )
        .unwrap();
        assert!(doc.last_updated.is_some());
        assert_eq!(doc.states.len(), 1);

        let bare = RegistryCache::from_json(r#"[{"entity_id":"light.a"},{"entity_id":"fan.b"}]"#)
            .unwrap();
        assert!(bare.last_updated.is_none());
        assert_eq!(bare.into_entities().len(), 2);
    }

    #[test]
    fn malformed_cache_is_a_decode_error() {
        let err = RegistryCache::from_json("{not json").unwrap_err();
        assert!(matches!(err, CoreError::RegistryDecode { .. }));
    }
}
