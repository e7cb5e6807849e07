//! # Courier Domain
//!
//! Data types shared by every Courier crate.
//!
//! This crate contains:
//! - Request descriptors (target, method, headers, query, body)
//! - The credential triple and response outcome types
//! - The [`CourierError`] taxonomy and `Result` alias
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Courier crates
//! - Only external dependencies allowed
//! - Pure data, no I/O

pub mod config;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
