use std::time::Duration;

use async_trait::async_trait;
use courier_core::Transport;
use courier_domain::{CourierError, HttpConfig, RequestDescriptor, ResponseOutcome, Result};
use reqwest::Client as ReqwestClient;
use tracing::debug;

use super::request::{build_headers, build_url, to_method};
use crate::errors::InfraError;

/// reqwest-backed [`Transport`] with timeout support.
///
/// Every call is a single attempt; the status code is returned as-is for the
/// orchestrator to classify.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Client configured from the `http` section of the courier config.
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        let mut builder = Self::builder().timeout(Duration::from_secs(config.timeout_seconds));
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(
        &self,
        request: &RequestDescriptor,
        credential: Option<&str>,
    ) -> Result<ResponseOutcome> {
        let url = build_url(request)?;
        let headers = build_headers(request, credential)?;
        let method = to_method(request.method());

        let mut builder = self.client.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = request.body() {
            let bytes = serde_json::to_vec(body).map_err(|e| {
                CourierError::MalformedTarget(format!("request body could not be encoded: {e}"))
            })?;
            builder = builder.body(bytes);
        }

        debug!(%method, %url, "sending HTTP request");
        let response = builder.send().await.map_err(|err| {
            debug!(%method, %url, error = %err, "HTTP request failed");
            CourierError::from(InfraError::from(err))
        })?;

        let status = response.status();
        debug!(%method, %url, %status, "received HTTP response");

        let body = response.bytes().await.map_err(|err| CourierError::from(InfraError::from(err)))?;
        Ok(ResponseOutcome::new(status.as_u16(), body.to_vec()))
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30), user_agent: None, default_headers: None }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Headers sent with every request; descriptor headers take precedence.
    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| CourierError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
