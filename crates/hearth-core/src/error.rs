// ── Core error types ──
//
// Resolution itself never fails: unresolved phrases come back as `None`
// or an empty list. These errors cover the collaborator edges only
// (decoding a registry cache, loading an alias document).

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Registry errors ──────────────────────────────────────────────
    #[error("Registry cache could not be decoded: {message}")]
    RegistryDecode { message: String },

    // ── Alias errors ─────────────────────────────────────────────────
    #[error("Alias document unavailable at {source_name}: {reason}")]
    AliasLoad { source_name: String, reason: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::RegistryDecode {
            message: err.to_string(),
        }
    }
}
