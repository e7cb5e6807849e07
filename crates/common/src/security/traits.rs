//! Traits for secure key/value storage
//!
//! The credential cache only needs get/set/delete over a handful of string
//! slots. Abstracting that behind [`SecureStore`] lets tests run against an
//! in-memory map instead of the system keychain.

use thiserror::Error;

/// Trait for keychain-like storage of small secrets
///
/// Implementations must be safe to call from several threads at once.
/// Callers serialize access to a given key themselves.
pub trait SecureStore: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// `Ok(None)` when no entry exists for `key`
    ///
    /// # Errors
    /// Returns error if the store cannot be accessed
    fn get_value(&self, key: &str) -> Result<Option<String>, KeychainError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    /// Returns error if the store cannot be written
    fn set_value(&self, key: &str, value: &str) -> Result<(), KeychainError>;

    /// Remove the entry stored under `key` (idempotent)
    ///
    /// # Errors
    /// Returns error if the store cannot be written
    fn remove_value(&self, key: &str) -> Result<(), KeychainError>;
}

/// Keychain error types
#[derive(Debug, Error)]
pub enum KeychainError {
    /// Keychain access failed (permission denied, not available, etc.)
    #[error("Keychain access failed: {0}")]
    AccessFailed(String),

    /// Entry not found in keychain
    #[error("Entry not found")]
    NotFound,
}
