//! Request/response cycle

pub mod orchestrator;

pub use orchestrator::RequestOrchestrator;
