//! Shared infrastructure utilities for Courier crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - (always): the [`security::SecureStore`] abstraction and its error type
//! - `platform`: platform keychain access via [`security::KeychainProvider`]
//! - `test-utils`: in-memory doubles in [`testing`]

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod security;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "platform")]
pub use security::KeychainProvider;
pub use security::{KeychainError, SecureStore};
