//! Secure credential storage
//!
//! - **[`traits`]**: the [`SecureStore`] capability consumed by the credential
//!   cache
//! - **[`keychain`]**: the platform keychain implementation (`platform`
//!   feature)

#[cfg(feature = "platform")]
pub mod keychain;
pub mod traits;

#[cfg(feature = "platform")]
pub use keychain::KeychainProvider;
pub use traits::{KeychainError, SecureStore};
