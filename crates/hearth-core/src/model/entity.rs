// ── Entity domain types ──
//
// An `Entity` is one controllable or observable object in the registry,
// addressed by a domain-qualified id such as `light.kitchen`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known domain names used by the command layer.
pub mod domain {
    pub const LIGHT: &str = "light";
    pub const SWITCH: &str = "switch";
    pub const FAN: &str = "fan";
    pub const COVER: &str = "cover";
    pub const CLIMATE: &str = "climate";
    pub const MEDIA_PLAYER: &str = "media_player";
    pub const SENSOR: &str = "sensor";
}

/// Extract the domain prefix of an entity id (`light.kitchen` -> `light`).
///
/// Ids without a dot have an empty domain.
pub fn domain_of(entity_id: &str) -> &str {
    entity_id.split_once('.').map_or("", |(domain, _)| domain)
}

/// The part of an entity id after the domain (`light.the_wall` -> `the_wall`).
pub fn object_id_of(entity_id: &str) -> &str {
    entity_id.split_once('.').map_or(entity_id, |(_, rest)| rest)
}

/// Lowercased text blob used for IDF construction and group filtering.
pub fn normalized_text(name: &str, entity_id: &str, area: Option<&str>, domain: &str) -> String {
    let mut text = String::with_capacity(name.len() + entity_id.len() + domain.len() + 16);
    text.push_str(name);
    text.push(' ');
    text.push_str(entity_id);
    if let Some(area) = area {
        text.push(' ');
        text.push_str(area);
    }
    text.push(' ');
    text.push_str(domain);
    text.to_lowercase()
}

/// The canonical registry entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_id: String,
    pub domain: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub supports_brightness: bool,
    #[serde(default)]
    pub normalized: String,
}

impl Entity {
    /// Build an entity from its id and display name. The domain and the
    /// normalized text are derived.
    pub fn new(entity_id: impl Into<String>, name: impl Into<String>) -> Self {
        let entity_id = entity_id.into();
        let domain = domain_of(&entity_id).to_owned();
        let mut entity = Self {
            entity_id,
            domain,
            name: name.into(),
            area: None,
            state: String::new(),
            attributes: Map::new(),
            supports_brightness: false,
            normalized: String::new(),
        };
        entity.renormalize();
        entity
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self.renormalize();
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    pub fn with_brightness(mut self, supported: bool) -> Self {
        self.supports_brightness = supported;
        self
    }

    /// Recompute `normalized` after editing name, id, area or domain.
    pub fn renormalize(&mut self) {
        self.normalized = normalized_text(
            &self.name,
            &self.entity_id,
            self.area.as_deref(),
            &self.domain,
        );
    }

    pub fn object_id(&self) -> &str {
        object_id_of(&self.entity_id)
    }

    pub fn is_in_domain(&self, domain: &str) -> bool {
        self.domain == domain
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn domain_is_derived_from_id() {
        let e = Entity::new("light.kitchen", "Kitchen");
        assert_eq!(e.domain, "light");
        assert_eq!(e.object_id(), "kitchen");
    }

    #[test]
    fn id_without_dot_has_empty_domain() {
        assert_eq!(domain_of("orphan"), "");
        assert_eq!(object_id_of("orphan"), "orphan");
    }

    #[test]
    fn normalized_includes_area_and_domain() {
        let e = Entity::new("light.couch", "Couch Lamp").with_area("Living Room");
        assert_eq!(e.normalized, "couch lamp light.couch living room light");
    }

    #[test]
    fn deserializes_with_defaults() {
        let e: Entity = serde_json::from_str(
            r#"{"entity_id":"switch.fan","domain":"switch","name":"Fan"}"#,
        )
        .unwrap();
        assert!(e.area.is_none());
        assert!(!e.supports_brightness);
        assert!(e.attributes.is_empty());
    }
}
