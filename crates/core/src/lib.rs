//! # Courier Core
//!
//! Request orchestration and credential caching - no infrastructure code.
//!
//! This crate contains:
//! - Port interfaces for the transport and decoder collaborators
//! - The [`CredentialStore`] cache over a secure key/value store
//! - The [`RequestOrchestrator`] request/response cycle
//!
//! ## Architecture Principles
//! - Only depends on `courier-common` and `courier-domain`
//! - No HTTP, JSON or keychain code
//! - All external dependencies via traits

pub mod credentials;
pub mod ports;
pub mod request;

// Re-export specific items to avoid ambiguity
pub use credentials::CredentialStore;
pub use ports::{Decoder, Transport};
pub use request::RequestOrchestrator;
