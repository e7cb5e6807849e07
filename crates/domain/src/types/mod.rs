//! Data types exchanged between the request orchestrator and its
//! collaborators

pub mod credential;
pub mod request;
pub mod response;

pub use credential::{Credential, CredentialField};
pub use request::{RequestDescriptor, RequestMethod, Target};
pub use response::{ErrorResponse, ResponseOutcome, StatusClass};
