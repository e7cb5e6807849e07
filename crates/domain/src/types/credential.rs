//! Credential types

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::impl_domain_enum_conversions;

/// The cached login / access-token / user-id triple
///
/// Each field is independently optional. A missing access token means "not
/// authenticated"; a present one says nothing about server-side validity,
/// which is only learned from the status code of a later response.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl Credential {
    #[must_use]
    pub fn new(login: Option<String>, access_token: Option<String>, user_id: Option<Uuid>) -> Self {
        Self { login, access_token, user_id }
    }

    /// True when an access token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

// Token values must never reach logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("login", &self.login)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Names of the individually cached credential fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialField {
    Login,
    AccessToken,
    UserId,
}

impl_domain_enum_conversions!(CredentialField {
    Login => "login",
    AccessToken => "access_token",
    UserId => "user_id",
});
