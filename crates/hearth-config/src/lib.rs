//! Shared configuration for the hearth resolver.
//!
//! A TOML file in the platform config directory, layered over built-in
//! defaults and `HEARTH_`-prefixed environment variables. Also owns the
//! on-disk formats the engine consumes: the alias document and the
//! persisted registry cache.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use hearth_core::resolve::{DEFAULT_SNIPPET_DOMAINS, DEFAULT_SNIPPET_LIMIT, DEFAULT_SNIPPET_PER_DOMAIN};
use hearth_core::{
    AliasStore, AliasTable, CoreError, RegistryCache, RegistryStore, SelectOptions,
    SnippetOptions,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {what} path configured")]
    MissingPath { what: &'static str },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Domains admitted into a snapshot unless configured otherwise.
pub const DEFAULT_INCLUDE_DOMAINS: &[&str] = &[
    "light",
    "switch",
    "fan",
    "cover",
    "climate",
    "media_player",
    "sensor",
    "binary_sensor",
    "lock",
    "scene",
    "script",
    "vacuum",
    "input_boolean",
];

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Persisted registry cache (JSON).
    pub registry_path: Option<PathBuf>,

    /// Alias document, TOML or JSON by extension.
    pub alias_path: Option<PathBuf>,

    pub alias_ttl_secs: u64,

    /// Domains admitted into the snapshot. Empty admits everything.
    pub include_domains: Vec<String>,

    pub min_score: f64,

    pub candidate_limit: usize,

    pub snippet: SnippetConfig,

    /// Registry re-read cadence for long-running sessions. Zero disables.
    pub refresh_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_path: None,
            alias_path: None,
            alias_ttl_secs: 60,
            include_domains: DEFAULT_INCLUDE_DOMAINS
                .iter()
                .map(|d| (*d).to_owned())
                .collect(),
            min_score: SelectOptions::DEFAULT_MIN_SCORE,
            candidate_limit: SelectOptions::DEFAULT_LIMIT,
            snippet: SnippetConfig::default(),
            refresh_interval_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SnippetConfig {
    pub limit: usize,
    pub per_domain: usize,
    pub domains: Vec<String>,
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SNIPPET_LIMIT,
            per_domain: DEFAULT_SNIPPET_PER_DOMAIN,
            domains: DEFAULT_SNIPPET_DOMAINS
                .iter()
                .map(|d| (*d).to_owned())
                .collect(),
        }
    }
}

impl Config {
    pub fn alias_ttl(&self) -> Duration {
        Duration::from_secs(self.alias_ttl_secs)
    }

    /// `None` when periodic refresh is disabled.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }

    pub fn snippet_options(&self) -> SnippetOptions {
        SnippetOptions {
            domains: self.snippet.domains.clone(),
            limit: self.snippet.limit,
            per_domain: self.snippet.per_domain,
        }
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_score.is_finite() || self.min_score < 0.0 {
            return Err(ConfigError::Validation {
                field: "min_score".into(),
                reason: format!("expected a non-negative number, got {}", self.min_score),
            });
        }
        if self.candidate_limit == 0 {
            return Err(ConfigError::Validation {
                field: "candidate_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.snippet.limit == 0 || self.snippet.per_domain == 0 {
            return Err(ConfigError::Validation {
                field: "snippet".into(),
                reason: "limit and per_domain must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// An empty store carrying this config's domain filter.
    pub fn registry_store(&self) -> RegistryStore {
        RegistryStore::with_include_domains(self.include_domains.clone())
    }

    /// Alias store reloading from `alias_path` every `alias_ttl`. Without
    /// a path the store serves an empty table.
    pub fn alias_store(&self) -> AliasStore {
        match &self.alias_path {
            Some(path) => {
                let path = path.clone();
                AliasStore::new(self.alias_ttl(), move || load_alias_table(&path))
            }
            None => AliasStore::fixed(AliasTable::new()),
        }
    }

    /// Like [`alias_store`](Self::alias_store), but the first load must
    /// succeed. Later reload failures keep serving the last good table.
    pub fn open_alias_store(&self) -> Result<AliasStore, CoreError> {
        let Some(path) = self.alias_path.clone() else {
            return Ok(AliasStore::fixed(AliasTable::new()));
        };
        let table = load_alias_table(&path)?;
        Ok(AliasStore::preloaded(table, self.alias_ttl(), move || {
            load_alias_table(&path)
        }))
    }

    /// Read and decode the registry cache at `registry_path`.
    pub fn read_registry(&self) -> Result<RegistryCache, ConfigError> {
        let path = self
            .registry_path
            .as_deref()
            .ok_or(ConfigError::MissingPath { what: "registry" })?;
        load_registry_cache(path)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "hearth", "hearth").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hearth");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HEARTH_").split("__"))
}

/// Load the config at `path` layered with the environment. A missing
/// file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    config.validate()?;
    Ok(config)
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

// ── Config saving ───────────────────────────────────────────────────

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

// ── Alias documents ─────────────────────────────────────────────────

/// Either `phrase = "entity_id"` pairs at the top level, or the same
/// pairs under an `aliases` table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AliasDocument {
    Nested { aliases: BTreeMap<String, String> },
    Flat(BTreeMap<String, String>),
}

impl AliasDocument {
    fn into_table(self) -> AliasTable {
        match self {
            Self::Nested { aliases } | Self::Flat(aliases) => aliases.into_iter().collect(),
        }
    }
}

/// Parse alias document text. `json` selects JSON, anything else TOML.
pub fn parse_alias_document(text: &str, json: bool) -> Result<AliasTable, String> {
    let doc: AliasDocument = if json {
        serde_json::from_str(text).map_err(|e| e.to_string())?
    } else {
        toml::from_str(text).map_err(|e| e.to_string())?
    };
    Ok(doc.into_table())
}

/// Read the alias document at `path`.
pub fn load_alias_table(path: &Path) -> Result<AliasTable, CoreError> {
    let alias_error = |reason: String| CoreError::AliasLoad {
        source_name: path.display().to_string(),
        reason,
    };
    let text = std::fs::read_to_string(path).map_err(|e| alias_error(e.to_string()))?;
    let json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let table = parse_alias_document(&text, json).map_err(alias_error)?;
    debug!(path = %path.display(), aliases = table.len(), "alias document loaded");
    Ok(table)
}

// ── Registry cache ──────────────────────────────────────────────────

/// Read and decode a persisted registry cache.
pub fn load_registry_cache(path: &Path) -> Result<RegistryCache, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let cache = RegistryCache::from_json(&text)?;
    debug!(path = %path.display(), states = cache.states.len(), "registry cache read");
    Ok(cache)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_sane() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.alias_ttl(), Duration::from_secs(60));
        assert_eq!(cfg.refresh_interval(), Some(Duration::from_secs(30)));
        assert_eq!(cfg.snippet_options(), SnippetOptions::default());
        assert!(cfg.include_domains.iter().any(|d| d == "media_player"));
    }

    #[test]
    fn file_and_env_layer_over_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    alias_path = "aliases.toml"
                    min_score = 2.5
                    include_domains = ["light"]

                    [snippet]
                    limit = 10
                "#,
            )?;
            jail.set_env("HEARTH_CANDIDATE_LIMIT", "9");
            jail.set_env("HEARTH_SNIPPET__PER_DOMAIN", "3");

            let cfg = load_config_from(Path::new("config.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg.alias_path, Some(PathBuf::from("aliases.toml")));
            assert!((cfg.min_score - 2.5).abs() < f64::EPSILON);
            assert_eq!(cfg.include_domains, vec!["light".to_owned()]);
            assert_eq!(cfg.candidate_limit, 9);
            assert_eq!(cfg.snippet.limit, 10);
            assert_eq!(cfg.snippet.per_domain, 3);
            assert_eq!(cfg.alias_ttl_secs, 60);
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let cfg = load_config_from(Path::new("nope.toml")).map_err(|e| e.to_string())?;
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cfg = Config {
            candidate_limit: 0,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Validation { field, .. }) if field == "candidate_limit"
        ));

        let cfg = Config {
            min_score: -1.0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn refresh_can_be_disabled() {
        let cfg = Config {
            refresh_interval_secs: 0,
            ..Config::default()
        };
        assert_eq!(cfg.refresh_interval(), None);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            registry_path: Some(PathBuf::from("/var/lib/hearth/registry.json")),
            min_score: 3.0,
            ..Config::default()
        };
        save_config_to(&cfg, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn flat_and_nested_toml_alias_documents() {
        let flat = parse_alias_document(
            r#"
                couch = "light.couch"
                "The Wall" = "light.the_wall"
            "#,
            false,
        )
        .unwrap();
        assert_eq!(flat.lookup("the wall"), Some("light.the_wall"));

        let nested = parse_alias_document(
            r#"
                [aliases]
                whiskey = "light.whiskey"
            "#,
            false,
        )
        .unwrap();
        assert_eq!(nested.lookup("whiskey"), Some("light.whiskey"));
        assert_eq!(nested.len(), 1);
    }

    #[test]
    fn json_alias_document_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.json");
        std::fs::write(&path, r#"{"aliases": {"couch": "light.couch"}}"#).unwrap();

        let table = load_alias_table(&path).unwrap();
        assert_eq!(table.lookup("COUCH"), Some("light.couch"));
    }

    #[test]
    fn unreadable_alias_document_is_alias_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            load_alias_table(&missing),
            Err(CoreError::AliasLoad { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "couch = [").unwrap();
        assert!(matches!(
            load_alias_table(&broken),
            Err(CoreError::AliasLoad { .. })
        ));
    }

    #[test]
    fn alias_store_without_path_is_empty() {
        let store = Config::default().alias_store();
        assert!(store.current().is_empty());
    }

    #[test]
    fn open_alias_store_requires_a_readable_document() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config {
            alias_path: Some(dir.path().join("missing.toml")),
            ..Config::default()
        };
        assert!(cfg.open_alias_store().is_err());
        assert!(cfg.alias_store().current().is_empty());
    }

    #[test]
    fn alias_store_picks_up_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.toml");
        std::fs::write(&path, r#"couch = "light.couch""#).unwrap();

        let cfg = Config {
            alias_path: Some(path.clone()),
            alias_ttl_secs: 0,
            ..Config::default()
        };
        let store = cfg.alias_store();
        assert_eq!(store.current().lookup("couch"), Some("light.couch"));

        std::fs::write(&path, r#"couch = "light.sofa""#).unwrap();
        assert_eq!(store.current().lookup("couch"), Some("light.sofa"));
    }

    #[test]
    fn registry_cache_is_read_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        std::fs::write(
            &path,
            r#"{"states":[
                {"entity_id":"light.couch","state":"on","attributes":{"friendly_name":"Couch Lamp"}},
                {"entity_id":"automation.night","state":"on"}
            ]}"#,
        )
        .unwrap();

        let cfg = Config {
            registry_path: Some(path),
            ..Config::default()
        };
        let store = cfg.registry_store();
        let snapshot = store.apply_cache(cfg.read_registry().unwrap());
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.entity_by_id("automation.night").is_none());
    }

    #[test]
    fn missing_registry_path_is_reported() {
        assert!(matches!(
            Config::default().read_registry(),
            Err(ConfigError::MissingPath { what: "registry" })
        ));
    }
}
