//! # Courier Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-based HTTP transport
//! - The JSON decoder
//! - Configuration loading from environment and files
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `courier-core`
//! - Depends on `courier-common`, `courier-domain` and `courier-core`
//! - Contains all "impure" code (network I/O, keychain, files)

pub mod config;
pub mod context;
pub mod decoding;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use context::{Courier, CourierContext};
pub use decoding::JsonDecoder;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::{init_tracing, LogFormat};
