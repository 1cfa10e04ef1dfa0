//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use hearth_config::ConfigError;
use hearth_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const DATA: i32 = 65;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Registry ─────────────────────────────────────────────────────
    #[error("No registry cache configured")]
    #[diagnostic(
        code(hearth::no_registry),
        help(
            "Pass --registry <FILE> or set registry_path in {config_path}.\n\
             The file is the JSON registry cache written by the fetcher."
        )
    )]
    NoRegistry { config_path: String },

    #[error("Registry cache at {path} could not be used")]
    #[diagnostic(
        code(hearth::registry),
        help("Expected a JSON document with a \"states\" array, or a bare array of states.")
    )]
    Registry {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Aliases ──────────────────────────────────────────────────────
    #[error("Alias document {source_name} could not be loaded: {reason}")]
    #[diagnostic(
        code(hearth::aliases),
        help("Use a flat `phrase = \"entity_id\"` table or an [aliases] table.")
    )]
    Alias { source_name: String, reason: String },

    // ── Resolution ───────────────────────────────────────────────────
    #[error("No entity matched '{text}'")]
    #[diagnostic(
        code(hearth::unresolved),
        help("Run: hearth candidates {text}  to see what scored, if anything")
    )]
    Unresolved { text: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hearth::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(hearth::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(hearth::config))]
    Config(Box<ConfigError>),

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(hearth::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render output: {0}")]
    #[diagnostic(code(hearth::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Unresolved { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NoRegistry { .. } => exit_code::USAGE,
            Self::ConfigExists { .. } => exit_code::CONFLICT,
            Self::Registry { .. } | Self::Alias { .. } => exit_code::DATA,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RegistryDecode { message } => CliError::Registry {
                path: "registry cache".into(),
                source: message.into(),
            },
            CoreError::AliasLoad {
                source_name,
                reason,
            } => CliError::Alias {
                source_name,
                reason,
            },
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Core(core) => core.into(),
            other => CliError::Config(Box::new(other)),
        }
    }
}
