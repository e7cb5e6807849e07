//! Request descriptor types
//!
//! A [`RequestDescriptor`] is an immutable description of one outbound call:
//! where it goes, which method it uses, what it carries, and whether it
//! needs an access token. Descriptors are assembled with the builder methods
//! and then handed to the orchestrator by reference.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CourierError, Result};
use crate::impl_domain_enum_conversions;

/// Server address: scheme, host and optional port
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub scheme: String,
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl Target {
    #[must_use]
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: Option<u16>) -> Self {
        Self { scheme: scheme.into(), host: host.into(), port }
    }

    /// HTTPS target on the default port.
    #[must_use]
    pub fn https(host: impl Into<String>) -> Self {
        Self::new("https", host, None)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

/// HTTP request methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl_domain_enum_conversions!(RequestMethod {
    Get => "GET",
    Post => "POST",
    Put => "PUT",
    Patch => "PATCH",
    Delete => "DELETE",
    Head => "HEAD",
});

/// Immutable description of one outbound call
///
/// Headers and query parameters are kept in ordered maps so that two
/// descriptors built in a different order compare equal and render the same
/// URL. A query value of `None` means "key present, no value" (`?flag`).
///
/// A body is accepted for every method, including GET; keeping GET bodies
/// out is the descriptor author's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    target: Target,
    path: String,
    method: RequestMethod,
    headers: BTreeMap<String, String>,
    query: BTreeMap<String, Option<String>>,
    body: Option<serde_json::Value>,
    requires_credential: bool,
}

impl RequestDescriptor {
    /// Create a descriptor that requires a credential and carries no
    /// headers, query or body.
    #[must_use]
    pub fn new(method: RequestMethod, target: Target, path: impl Into<String>) -> Self {
        Self {
            target,
            path: path.into(),
            method,
            headers: BTreeMap::new(),
            query: BTreeMap::new(),
            body: None,
            requires_credential: true,
        }
    }

    #[must_use]
    pub fn get(target: Target, path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Get, target, path)
    }

    #[must_use]
    pub fn post(target: Target, path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Post, target, path)
    }

    #[must_use]
    pub fn put(target: Target, path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Put, target, path)
    }

    #[must_use]
    pub fn patch(target: Target, path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Patch, target, path)
    }

    #[must_use]
    pub fn delete(target: Target, path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Delete, target, path)
    }

    #[must_use]
    pub fn head(target: Target, path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Head, target, path)
    }

    /// Add or replace a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add or replace a query parameter with a value.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), Some(value.into()));
        self
    }

    /// Add a query key without a value.
    #[must_use]
    pub fn query_flag(mut self, key: impl Into<String>) -> Self {
        self.query.insert(key.into(), None);
        self
    }

    /// Attach a JSON body serialized from `body`.
    ///
    /// Dates serialize in ISO 8601 form through chrono's serde support.
    ///
    /// # Errors
    /// Returns `CourierError::MalformedTarget` if `body` cannot be
    /// represented as JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            CourierError::MalformedTarget(format!("request body could not be serialized: {e}"))
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Attach an already-built JSON body.
    #[must_use]
    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Mark the call as public: no access token is fetched or sent.
    #[must_use]
    pub fn public(self) -> Self {
        self.requires_credential(false)
    }

    #[must_use]
    pub fn requires_credential(mut self, required: bool) -> Self {
        self.requires_credential = required;
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> RequestMethod {
        self.method
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn query_params(&self) -> &BTreeMap<String, Option<String>> {
        &self.query
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Whether the orchestrator must obtain a token before executing.
    pub fn needs_credential(&self) -> bool {
        self.requires_credential
    }
}
