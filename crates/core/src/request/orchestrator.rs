//! Request orchestrator
//!
//! Runs one request/response cycle:
//! 1. Fetch the access token when the descriptor requires one
//! 2. Execute the request through the [`Transport`]
//! 3. Classify the status code
//! 4. Decode the typed result, or the server's error payload
//!
//! A 401 or 423 response drops the cached credential and surfaces
//! `RequiresReauthentication`. Nothing is retried.

use std::sync::Arc;

use courier_domain::{
    CourierError, ErrorResponse, RequestDescriptor, ResponseOutcome, Result, StatusClass,
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::credentials::CredentialStore;
use crate::ports::{Decoder, Transport};

/// Executes described requests with credential injection and status
/// handling
///
/// Holds no mutable state of its own; concurrent calls only contend on the
/// shared [`CredentialStore`].
pub struct RequestOrchestrator<T: ?Sized, D> {
    transport: Arc<T>,
    decoder: D,
    credentials: Arc<CredentialStore>,
}

impl<T, D> RequestOrchestrator<T, D>
where
    T: Transport + ?Sized,
    D: Decoder,
{
    #[must_use]
    pub fn new(transport: Arc<T>, decoder: D, credentials: Arc<CredentialStore>) -> Self {
        Self { transport, decoder, credentials }
    }

    /// Credential store shared with this orchestrator.
    #[must_use]
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Execute `request` and decode a 2xx body as `R`
    ///
    /// # Errors
    /// - `RequiresReauthentication` if a token is required but missing, or
    ///   the server answered 401/423
    /// - `Domain` with the server's error payload for any other non-2xx
    /// - `Decoding` if the success or error body has the wrong shape
    /// - Transport failures unchanged
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn perform<R: DeserializeOwned>(&self, request: &RequestDescriptor) -> Result<R> {
        let outcome = self.run(request).await?;
        self.decoder.decode(&outcome.body)
    }

    /// Execute `request` and return the 2xx status code without decoding
    /// the body
    ///
    /// # Errors
    /// Same as [`perform`](Self::perform), minus success-body decoding.
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn perform_status(&self, request: &RequestDescriptor) -> Result<u16> {
        let outcome = self.run(request).await?;
        Ok(outcome.status)
    }

    /// Steps 1-3: token, transport, classification. Returns only successful
    /// outcomes.
    async fn run(&self, request: &RequestDescriptor) -> Result<ResponseOutcome> {
        // Captured once; a concurrent logout cannot change what this call sends.
        let token = if request.needs_credential() { Some(self.credentials.token()?) } else { None };

        let outcome = self.transport.execute(request, token.as_deref()).await?;
        debug!(status = outcome.status, bytes = outcome.body.len(), "Received response");

        match outcome.class() {
            StatusClass::Success => Ok(outcome),
            StatusClass::Unauthorized => {
                if let Err(err) = self.credentials.set_token(None) {
                    warn!(
                        error = %err,
                        kind = err.label(),
                        "Failed to clear credentials after auth rejection"
                    );
                }
                warn!(status = outcome.status, "Server rejected credentials");
                Err(CourierError::RequiresReauthentication)
            }
            StatusClass::Failure => {
                let payload: ErrorResponse = self.decoder.decode(&outcome.body)?;
                debug!(status = outcome.status, reason = %payload.reason, "Server reported error");
                Err(CourierError::Domain(payload))
            }
        }
    }
}
