//! Wiring of the concrete adapters into a ready-to-use client

use std::sync::Arc;

use courier_common::{KeychainProvider, SecureStore};
use courier_core::{CredentialStore, RequestOrchestrator};
use courier_domain::{CourierConfig, Result, Target};
use tracing::{info, warn};

use crate::decoding::JsonDecoder;
use crate::http::HttpClient;

/// Orchestrator over the reqwest transport and the JSON decoder.
pub type Courier = RequestOrchestrator<HttpClient, JsonDecoder>;

/// Everything an application needs to issue requests
///
/// Built once at startup and shared; the credential store inside is the
/// single cache for the whole process.
pub struct CourierContext {
    pub config: CourierConfig,
    pub credentials: Arc<CredentialStore>,
    pub courier: Courier,
}

impl CourierContext {
    /// Build a context backed by the platform keychain
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: CourierConfig) -> Result<Self> {
        let keychain = KeychainProvider::new(config.credentials.service_name());
        Self::with_secure_store(config, Arc::new(keychain))
    }

    /// Build a context over a caller-supplied secure store
    ///
    /// A persisted token is loaded eagerly. Failing to read it is logged and
    /// leaves the cache cold; the next token lookup retries.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_secure_store(config: CourierConfig, store: Arc<dyn SecureStore>) -> Result<Self> {
        let credentials = Arc::new(CredentialStore::new(&config.credentials, store));
        match credentials.initialize() {
            Ok(signed_in) => info!(signed_in, "Credential store ready"),
            Err(err) => warn!(error = %err, "Could not load persisted credentials"),
        }

        let transport = Arc::new(HttpClient::from_config(&config.http)?);
        let courier = RequestOrchestrator::new(transport, JsonDecoder::new(), Arc::clone(&credentials));

        Ok(Self { config, credentials, courier })
    }

    /// Default API server from the configuration.
    #[must_use]
    pub fn api(&self) -> Target {
        self.config.api.clone()
    }
}
