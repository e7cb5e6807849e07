//! Credential caching over the secure store

pub mod store;

pub use store::CredentialStore;
