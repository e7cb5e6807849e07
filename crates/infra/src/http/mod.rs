//! HTTP transport built on reqwest.

pub mod client;
pub mod request;

pub use client::{HttpClient, HttpClientBuilder};
pub use request::{build_headers, build_url};
