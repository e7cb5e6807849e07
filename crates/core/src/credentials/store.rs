//! Credential store with read-through caching
//!
//! Keeps login, access token and user id in memory in front of a
//! [`SecureStore`]:
//! - Getters serve the cache and fall back to the secure store on a miss
//! - Setters update the cache first, then persist or delete the entry
//! - Clearing the token is a full logout: every slot is dropped
//!
//! Each field sits behind its own `RwLock`. Reads of a field run in
//! parallel; a write holds the field's lock until the secure store has been
//! updated, so no reader sees a value whose write is still in flight. Fields
//! are independent: a reader may observe login and token from different
//! sessions.

use std::sync::Arc;

use courier_common::{KeychainError, SecureStore};
use courier_domain::{Credential, CredentialField, CredentialStoreConfig, CourierError, Result};
use parking_lot::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Thread-safe cache of the current credential
///
/// Built once by the application and shared through `Arc` with everything
/// that needs a token.
pub struct CredentialStore {
    store: Arc<dyn SecureStore>,
    login_key: String,
    access_key: String,
    user_id_key: String,
    // Lock order for multi-field operations: login, token, user_id.
    login: RwLock<Option<String>>,
    token: RwLock<Option<String>>,
    user_id: RwLock<Option<Uuid>>,
}

impl CredentialStore {
    /// Create a store with an empty cache
    ///
    /// # Arguments
    /// * `config` - Key names of the three credential slots
    /// * `store` - Secure store the slots are persisted in
    #[must_use]
    pub fn new(config: &CredentialStoreConfig, store: Arc<dyn SecureStore>) -> Self {
        Self {
            store,
            login_key: config.login_key.clone(),
            access_key: config.access_key.clone(),
            user_id_key: config.user_id_key.clone(),
            login: RwLock::new(None),
            token: RwLock::new(None),
            user_id: RwLock::new(None),
        }
    }

    /// Warm the token cache from the secure store
    ///
    /// Should be called on startup.
    ///
    /// # Returns
    /// `true` if a persisted token was loaded, `false` if none exists
    ///
    /// # Errors
    /// Returns error if the secure store cannot be read
    pub fn initialize(&self) -> Result<bool> {
        match self.token() {
            Ok(_) => {
                info!("Credential store initialized with existing token");
                Ok(true)
            }
            Err(CourierError::RequiresReauthentication) => {
                debug!("No existing token found in secure store");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Current login
    ///
    /// # Errors
    /// `NotFound(Login)` when neither the cache nor the secure store has one
    pub fn login(&self) -> Result<String> {
        read_through(&self.login, || self.fetch(&self.login_key))?
            .ok_or(CourierError::NotFound(CredentialField::Login))
    }

    /// Current access token
    ///
    /// # Errors
    /// `RequiresReauthentication` when no token is cached or persisted
    pub fn token(&self) -> Result<String> {
        read_through(&self.token, || self.fetch(&self.access_key))?
            .ok_or(CourierError::RequiresReauthentication)
    }

    /// Current user id
    ///
    /// # Errors
    /// `NotFound(UserId)` when absent, or when the persisted value is not a
    /// valid UUID
    pub fn user_id(&self) -> Result<Uuid> {
        read_through(&self.user_id, || {
            let raw = self.fetch(&self.user_id_key)?;
            Ok(raw.and_then(|value| match Uuid::parse_str(&value) {
                Ok(id) => Some(id),
                Err(err) => {
                    debug!(error = %err, "Persisted user id is not a valid UUID");
                    None
                }
            }))
        })?
        .ok_or(CourierError::NotFound(CredentialField::UserId))
    }

    /// Whether a token is cached. Never consults the secure store.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    /// Replace the login; `None` removes the persisted entry
    ///
    /// # Errors
    /// Returns error if the secure store cannot be written. The cache keeps
    /// the new value either way.
    pub fn set_login(&self, login: Option<String>) -> Result<()> {
        let mut cached = self.login.write();
        *cached = login;
        self.persist(&self.login_key, cached.as_deref())
    }

    /// Replace the access token
    ///
    /// `Some` persists the token. `None` is a full logout: every cached
    /// field is cleared and every persisted slot is removed.
    ///
    /// # Errors
    /// Returns error if the secure store cannot be written. The cache keeps
    /// the new state either way.
    pub fn set_token(&self, token: Option<String>) -> Result<()> {
        match token {
            Some(token) => {
                let mut cached = self.token.write();
                *cached = Some(token);
                self.persist(&self.access_key, cached.as_deref())
            }
            None => self.logout(),
        }
    }

    /// Replace the user id; `None` removes the persisted entry
    ///
    /// # Errors
    /// Returns error if the secure store cannot be written. The cache keeps
    /// the new value either way.
    pub fn set_user_id(&self, user_id: Option<Uuid>) -> Result<()> {
        let mut cached = self.user_id.write();
        *cached = user_id;
        let rendered = cached.map(|id| id.hyphenated().to_string());
        self.persist(&self.user_id_key, rendered.as_deref())
    }

    /// Record a freshly authenticated session
    ///
    /// The token is written first, so a credential without a token behaves
    /// like a logout followed by storing the remaining fields.
    ///
    /// # Errors
    /// Returns the first secure store failure
    pub fn store_session(&self, credential: Credential) -> Result<()> {
        self.set_token(credential.access_token)?;
        self.set_login(credential.login)?;
        self.set_user_id(credential.user_id)?;
        info!("Session stored");
        Ok(())
    }

    /// Explicit logout, same as `set_token(None)`
    ///
    /// # Errors
    /// Returns error if a persisted slot cannot be removed
    pub fn clear(&self) -> Result<()> {
        self.set_token(None)
    }

    /// Cached values only; fields are read independently.
    #[must_use]
    pub fn snapshot(&self) -> Credential {
        Credential {
            login: self.login.read().clone(),
            access_token: self.token.read().clone(),
            user_id: *self.user_id.read(),
        }
    }

    fn logout(&self) -> Result<()> {
        let mut login = self.login.write();
        let mut token = self.token.write();
        let mut user_id = self.user_id.write();
        *login = None;
        *token = None;
        *user_id = None;

        // Attempt every slot even if one fails, report the first failure.
        let mut first_error = None;
        for key in [&self.login_key, &self.access_key, &self.user_id_key] {
            if let Err(err) = self.persist(key, None) {
                first_error.get_or_insert(err);
            }
        }

        info!("Credentials cleared (logged out)");
        first_error.map_or(Ok(()), Err)
    }

    fn fetch(&self, key: &str) -> Result<Option<String>> {
        debug!(key = %key, "Credential cache miss, reading secure store");
        self.store.get_value(key).map_err(storage_error)
    }

    fn persist(&self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => self.store.set_value(key, value),
            None => self.store.remove_value(key),
        }
        .map_err(storage_error)
    }
}

/// Serve `slot` from the cache, or load it with `load` and cache the result.
///
/// A miss in the backing store leaves the slot empty so the next call looks
/// again.
fn read_through<T, F>(slot: &RwLock<Option<T>>, load: F) -> Result<Option<T>>
where
    T: Clone,
    F: FnOnce() -> Result<Option<T>>,
{
    if let Some(value) = slot.read().as_ref() {
        return Ok(Some(value.clone()));
    }

    let mut cached = slot.write();
    // Another caller may have filled the slot while we waited.
    if let Some(value) = cached.as_ref() {
        return Ok(Some(value.clone()));
    }

    let loaded = load()?;
    if let Some(value) = &loaded {
        *cached = Some(value.clone());
    }
    Ok(loaded)
}

fn storage_error(err: KeychainError) -> CourierError {
    CourierError::Storage(err.to_string())
}

#[cfg(test)]
mod tests {
    use courier_common::testing::MockKeychainProvider;

    use super::*;

    fn store_with(keychain: &MockKeychainProvider) -> CredentialStore {
        let config = CredentialStoreConfig::new("https", "users.example.com");
        CredentialStore::new(&config, Arc::new(keychain.clone()))
    }

    #[test]
    fn test_empty_store() {
        let keychain = MockKeychainProvider::default();
        let store = store_with(&keychain);

        assert!(!store.has_token());
        assert_eq!(store.login(), Err(CourierError::NotFound(CredentialField::Login)));
        assert_eq!(store.token(), Err(CourierError::RequiresReauthentication));
        assert_eq!(store.user_id(), Err(CourierError::NotFound(CredentialField::UserId)));
        assert_eq!(store.snapshot(), Credential::default());
    }

    #[test]
    fn test_miss_is_not_cached() {
        let keychain = MockKeychainProvider::default();
        let store = store_with(&keychain);

        assert!(store.login().is_err());
        keychain.seed("login", "alice");
        assert_eq!(store.login().unwrap(), "alice");
        assert_eq!(keychain.read_count(), 2);
    }

    #[test]
    fn test_hit_skips_secure_store() {
        let keychain = MockKeychainProvider::default();
        keychain.seed("access", "abc");
        let store = store_with(&keychain);

        assert_eq!(store.token().unwrap(), "abc");
        assert_eq!(store.token().unwrap(), "abc");
        assert_eq!(keychain.read_count(), 1);
        assert!(store.has_token());
    }

    #[test]
    fn test_invalid_user_id_is_not_found() {
        let keychain = MockKeychainProvider::default();
        keychain.seed("user_id", "not-a-uuid");
        let store = store_with(&keychain);

        assert_eq!(store.user_id(), Err(CourierError::NotFound(CredentialField::UserId)));
    }

    #[test]
    fn test_initialize_warms_token() {
        let keychain = MockKeychainProvider::default();
        let store = store_with(&keychain);
        assert!(!store.initialize().unwrap());

        keychain.seed("access", "persisted");
        assert!(store.initialize().unwrap());
        assert!(store.has_token());
    }

    #[test]
    fn test_initialize_surfaces_storage_failure() {
        let keychain = MockKeychainProvider::default();
        keychain.fail_reads(true);
        let store = store_with(&keychain);

        assert!(matches!(store.initialize(), Err(CourierError::Storage(_))));
    }

    #[test]
    fn test_logout_clears_cache_even_when_store_fails() {
        let keychain = MockKeychainProvider::default();
        let store = store_with(&keychain);
        store.set_token(Some("abc".into())).unwrap();
        store.set_login(Some("alice".into())).unwrap();

        keychain.fail_writes(true);
        assert!(matches!(store.set_token(None), Err(CourierError::Storage(_))));
        assert!(!store.has_token());
        assert_eq!(store.snapshot().login, None);
        // Every slot was attempted.
        assert_eq!(keychain.delete_count(), 3);
    }
}
