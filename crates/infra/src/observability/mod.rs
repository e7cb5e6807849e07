//! Tracing setup for applications embedding the client.

pub mod logging;

pub use logging::{init_tracing, LogFormat};
