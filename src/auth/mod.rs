//! Authentication module
//!
//! The API key is attached to every outgoing request, either as a query
//! parameter (the SolarEdge default, `api_key`) or as a header.
//!
//! Attaching the key is a pure transformation of a `RequestSpec`; no I/O
//! happens here.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{Credential, Location, DEFAULT_CREDENTIAL_VAR};
