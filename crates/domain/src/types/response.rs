//! Response types and status classification

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw result of one transport call: status code and body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseOutcome {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ResponseOutcome {
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }
}

/// How the orchestrator treats a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200..300: decode the body as the requested type.
    Success,
    /// 401 Unauthorized or 423 Locked: drop the token, ask for login.
    Unauthorized,
    /// Anything else: decode the body as an [`ErrorResponse`].
    Failure,
}

impl StatusClass {
    #[must_use]
    pub const fn of(status: u16) -> Self {
        match status {
            200..=299 => Self::Success,
            401 | 423 => Self::Unauthorized,
            _ => Self::Failure,
        }
    }
}

/// Error payload returned by the server for failed requests
///
/// Matches the server's `{"error": true, "reason": "..."}` error model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default = "default_error_flag")]
    pub error: bool,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

fn default_error_flag() -> bool {
    true
}

impl ErrorResponse {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self { error: true, reason: reason.into(), code: None }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({code})", self.reason),
            None => f.write_str(&self.reason),
        }
    }
}
