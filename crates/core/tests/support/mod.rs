//! Shared test helpers for `courier-core` integration tests.
//!
//! Provides a scripted transport, a counting JSON decoder, and fixtures for
//! building a credential store over the in-memory keychain.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use courier_common::testing::MockKeychainProvider;
use courier_core::{CredentialStore, Decoder, RequestOrchestrator, Transport};
use courier_domain::{
    CourierError, CredentialStoreConfig, RequestDescriptor, ResponseOutcome, Result, Target,
};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;

/// What the transport saw for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub path: String,
    pub credential: Option<String>,
}

type Hook = Box<dyn Fn() + Send + Sync>;

/// Transport that replays scripted outcomes in order.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ResponseOutcome>>>,
    calls: Mutex<Vec<RecordedCall>>,
    on_execute: Mutex<Option<Hook>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses.lock().push_back(Ok(ResponseOutcome::new(status, body.as_bytes())));
        self
    }

    /// Queue a transport-level failure.
    pub fn fail(self, error: CourierError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    /// Run `hook` inside every `execute`, after the credential was captured.
    pub fn on_execute(self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        *self.on_execute.lock() = Some(Box::new(hook));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        credential: Option<&str>,
    ) -> Result<ResponseOutcome> {
        self.calls.lock().push(RecordedCall {
            path: request.path().to_string(),
            credential: credential.map(str::to_string),
        });

        if let Some(hook) = self.on_execute.lock().as_ref() {
            hook();
        }

        tokio::task::yield_now().await;

        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(CourierError::Transport("no scripted response left".into())))
    }
}

/// serde_json decoder that counts invocations.
#[derive(Clone, Default)]
pub struct CountingDecoder {
    calls: Arc<AtomicUsize>,
}

impl CountingDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Decoder for CountingDecoder {
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        serde_json::from_slice(bytes).map_err(|e| CourierError::Decoding(e.to_string()))
    }
}

pub fn credential_config() -> CredentialStoreConfig {
    CredentialStoreConfig::new("https", "users.example.com")
}

pub fn credential_store(keychain: &MockKeychainProvider) -> Arc<CredentialStore> {
    Arc::new(CredentialStore::new(&credential_config(), Arc::new(keychain.clone())))
}

pub fn api() -> Target {
    Target::https("api.example.com")
}

/// Everything a test needs to drive one orchestrator.
pub struct Harness {
    pub keychain: MockKeychainProvider,
    pub credentials: Arc<CredentialStore>,
    pub transport: Arc<ScriptedTransport>,
    pub decoder: CountingDecoder,
    pub orchestrator: RequestOrchestrator<ScriptedTransport, CountingDecoder>,
}

impl Harness {
    pub fn new(transport: ScriptedTransport) -> Self {
        let keychain = MockKeychainProvider::default();
        let credentials = credential_store(&keychain);
        let transport = Arc::new(transport);
        let decoder = CountingDecoder::new();
        let orchestrator = RequestOrchestrator::new(
            Arc::clone(&transport),
            decoder.clone(),
            Arc::clone(&credentials),
        );

        Self { keychain, credentials, transport, decoder, orchestrator }
    }

    /// Harness whose credential store already holds `token`.
    pub fn signed_in(token: &str, transport: ScriptedTransport) -> Self {
        let harness = Self::new(transport);
        harness.credentials.set_token(Some(token.to_string())).unwrap();
        harness
    }
}
