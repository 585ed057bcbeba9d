//! Authenticator implementation
//!
//! Applies the credential to a request spec according to the configured
//! placement.

use super::types::{validate_key, Credential, Location};
use crate::config::AuthPlacement;
use crate::error::Result;
use crate::http::RequestSpec;

/// Authenticator attaches the API key to request specs
#[derive(Debug, Clone)]
pub struct Authenticator {
    credential: Credential,
    placement: AuthPlacement,
}

impl Authenticator {
    /// Create a new authenticator
    pub fn new(credential: Credential, placement: AuthPlacement) -> Self {
        Self {
            credential,
            placement,
        }
    }

    /// Return a copy of `request` carrying the API key
    pub fn apply(&self, request: &RequestSpec) -> Result<RequestSpec> {
        validate_key(self.credential.expose())?;

        let key = self.credential.expose().to_string();
        let signed = match self.placement.location {
            Location::Query => request.clone().query(&self.placement.query_param, key),
            Location::Header => request.clone().header(&self.placement.header_name, key),
        };
        Ok(signed)
    }

    /// Strip the API key out of text that may echo it
    pub fn redact(&self, text: &str) -> String {
        self.credential.redact(text)
    }
}
