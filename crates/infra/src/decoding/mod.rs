//! Response body decoders.

pub mod json;

pub use json::JsonDecoder;
