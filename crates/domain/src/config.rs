//! Configuration management

use serde::{Deserialize, Serialize};

use crate::types::Target;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourierConfig {
    /// Default API server requests are built against.
    pub api: Target,
    pub credentials: CredentialStoreConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Secure store connection details for the credential cache
///
/// The keychain service is addressed by the user service's scheme and host;
/// the three keys name the slots for login, access token and user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialStoreConfig {
    pub service_scheme: String,
    pub service_host: String,
    #[serde(default = "default_login_key")]
    pub login_key: String,
    #[serde(default = "default_access_key")]
    pub access_key: String,
    #[serde(default = "default_user_id_key")]
    pub user_id_key: String,
}

impl CredentialStoreConfig {
    /// Config with the default key names.
    #[must_use]
    pub fn new(service_scheme: impl Into<String>, service_host: impl Into<String>) -> Self {
        Self {
            service_scheme: service_scheme.into(),
            service_host: service_host.into(),
            login_key: default_login_key(),
            access_key: default_access_key(),
            user_id_key: default_user_id_key(),
        }
    }

    #[must_use]
    pub fn with_keys(
        mut self,
        login_key: impl Into<String>,
        access_key: impl Into<String>,
        user_id_key: impl Into<String>,
    ) -> Self {
        self.login_key = login_key.into();
        self.access_key = access_key.into();
        self.user_id_key = user_id_key.into();
        self
    }

    /// Keychain service name, e.g. `https://users.example.com`.
    #[must_use]
    pub fn service_name(&self) -> String {
        format!("{}://{}", self.service_scheme, self.service_host)
    }
}

fn default_login_key() -> String {
    "login".to_string()
}

fn default_access_key() -> String {
    "access".to_string()
}

fn default_user_id_key() -> String {
    "user_id".to_string()
}

/// HTTP transport configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: default_timeout_seconds(), user_agent: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name() {
        let config = CredentialStoreConfig::new("https", "users.example.com");
        assert_eq!(config.service_name(), "https://users.example.com");
        assert_eq!(config.login_key, "login");
        assert_eq!(config.access_key, "access");
        assert_eq!(config.user_id_key, "user_id");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let json = r#"{
            "api": { "scheme": "https", "host": "api.example.com" },
            "credentials": { "service_scheme": "https", "service_host": "users.example.com" }
        }"#;

        let config: CourierConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api, Target::https("api.example.com"));
        assert_eq!(config.credentials.access_key, "access");
        assert_eq!(config.http, HttpConfig::default());
        assert_eq!(config.http.timeout_seconds, 30);
    }
}
