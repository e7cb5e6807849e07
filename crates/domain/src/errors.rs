//! Error types used throughout Courier

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CredentialField, ErrorResponse};

/// Main error type for Courier
///
/// Every failure a caller of the request orchestrator can observe is one of
/// these variants. `RequiresReauthentication` is the signal for the
/// surrounding application to send the user back through login.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CourierError {
    /// Credential field absent from both the cache and the secure store.
    #[error("Not found: {0}")]
    NotFound(CredentialField),

    /// No usable access token, or the server rejected it (401/423).
    #[error("Re-authentication required")]
    RequiresReauthentication,

    /// The network call could not complete.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response bytes did not match the expected shape.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// The descriptor could not be resolved into a valid URL or request.
    #[error("Malformed target: {0}")]
    MalformedTarget(String),

    /// Error payload reported by the server for a non-2xx response.
    #[error("Server error: {0}")]
    Domain(ErrorResponse),

    /// The secure store failed while reading or writing.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CourierError {
    /// Whether the caller must re-authenticate before retrying.
    #[must_use]
    pub const fn requires_reauthentication(&self) -> bool {
        matches!(self, Self::RequiresReauthentication)
    }

    /// Stable label suitable for structured log fields.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::RequiresReauthentication => "requires_reauthentication",
            Self::Transport(_) => "transport",
            Self::Decoding(_) => "decoding",
            Self::MalformedTarget(_) => "malformed_target",
            Self::Domain(_) => "domain",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
        }
    }
}

impl From<serde_json::Error> for CourierError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decoding(err.to_string())
    }
}

/// Result type alias for Courier operations
pub type Result<T> = std::result::Result<T, CourierError>;
