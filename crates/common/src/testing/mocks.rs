//! In-memory implementations of storage traits for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::security::{KeychainError, SecureStore};

type StorageData = Arc<Mutex<HashMap<String, String>>>;

/// In-memory keychain that mimics [`SecureStore`] semantics
///
/// Clones share the same storage and counters, so a test can keep one
/// handle for inspection while another is owned by the code under test.
/// Reads and writes are counted, and failures can be switched on to
/// exercise error paths.
#[derive(Clone)]
pub struct MockKeychainProvider {
    storage: StorageData,
    service_name: String,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
    deletes: Arc<AtomicUsize>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MockKeychainProvider {
    /// Create a new mock keychain provider with a service name for namespacing.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            storage: Arc::new(Mutex::new(HashMap::new())),
            service_name: service_name.into(),
            reads: Arc::new(AtomicUsize::new(0)),
            writes: Arc::new(AtomicUsize::new(0)),
            deletes: Arc::new(AtomicUsize::new(0)),
            fail_reads: Arc::new(AtomicBool::new(false)),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Store a secret directly, bypassing counters and failure injection.
    pub fn seed(&self, key: &str, value: &str) {
        self.storage.lock().insert(key.to_string(), value.to_string());
    }

    /// Peek at a stored secret without counting a read.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.storage.lock().get(key).cloned()
    }

    /// Determine whether a secret exists.
    #[must_use]
    pub fn secret_exists(&self, key: &str) -> bool {
        self.storage.lock().contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `get_value` calls made so far.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Make every subsequent read fail with `AccessFailed`.
    pub fn fail_reads(&self, enabled: bool) {
        self.fail_reads.store(enabled, Ordering::SeqCst);
    }

    /// Make every subsequent write or delete fail with `AccessFailed`.
    pub fn fail_writes(&self, enabled: bool) {
        self.fail_writes.store(enabled, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), KeychainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KeychainError::AccessFailed("mock keychain is read-only".to_string()));
        }
        Ok(())
    }
}

impl Default for MockKeychainProvider {
    fn default() -> Self {
        Self::new("courier-test")
    }
}

impl SecureStore for MockKeychainProvider {
    fn get_value(&self, key: &str) -> Result<Option<String>, KeychainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(KeychainError::AccessFailed("mock keychain is locked".to_string()));
        }
        Ok(self.storage.lock().get(key).cloned())
    }

    fn set_value(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check_writable()?;
        self.storage.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_value(&self, key: &str) -> Result<(), KeychainError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check_writable()?;
        self.storage.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_and_remove() {
        let keychain = MockKeychainProvider::default();

        keychain.set_value("access", "abc").unwrap();
        assert!(keychain.secret_exists("access"));
        assert_eq!(keychain.get_value("access").unwrap().as_deref(), Some("abc"));

        keychain.remove_value("access").unwrap();
        assert_eq!(keychain.get_value("access").unwrap(), None);
        assert_eq!(keychain.read_count(), 2);
        assert_eq!(keychain.write_count(), 1);
        assert_eq!(keychain.delete_count(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let keychain = MockKeychainProvider::default();
        let handle = keychain.clone();

        keychain.set_value("login", "alice").unwrap();
        assert_eq!(handle.peek("login").as_deref(), Some("alice"));
        assert_eq!(handle.write_count(), 1);
    }

    #[test]
    fn test_failure_injection() {
        let keychain = MockKeychainProvider::default();
        keychain.seed("login", "alice");

        keychain.fail_reads(true);
        assert!(matches!(keychain.get_value("login"), Err(KeychainError::AccessFailed(_))));

        keychain.fail_writes(true);
        assert!(keychain.set_value("login", "bob").is_err());
        assert!(keychain.remove_value("login").is_err());
        assert_eq!(keychain.peek("login").as_deref(), Some("alice"));
    }
}
