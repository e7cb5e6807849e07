//! Testing utilities
//!
//! - **[`mocks`]**: in-memory [`SecureStore`](crate::security::SecureStore)
//!   implementation with call counters and failure injection

pub mod mocks;

pub use mocks::MockKeychainProvider;
