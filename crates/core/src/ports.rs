//! Port interfaces for the request orchestrator's collaborators
//!
//! These traits define the boundaries between orchestration logic and the
//! infrastructure that performs network I/O and payload decoding.

use async_trait::async_trait;
use courier_domain::{RequestDescriptor, ResponseOutcome, Result};
use serde::de::DeserializeOwned;

/// Executes one described HTTP request
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform `request`, attaching `credential` as a bearer token when the
    /// descriptor requires one.
    ///
    /// Any status code is a successful execution; classification is the
    /// caller's job.
    ///
    /// # Errors
    /// `CourierError::Transport` when the call could not complete and
    /// `CourierError::MalformedTarget` when the descriptor does not resolve
    /// to a valid request.
    async fn execute(
        &self,
        request: &RequestDescriptor,
        credential: Option<&str>,
    ) -> Result<ResponseOutcome>;
}

/// Decodes raw response bytes into typed values
///
/// Implementations fix the field naming convention and the date format for
/// every type they decode.
pub trait Decoder: Send + Sync {
    /// # Errors
    /// `CourierError::Decoding` when the bytes do not match `T`.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}
