//! Auth types
//!
//! The credential is opaque: it can be attached to requests and redacted
//! out of text, but never formatted.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment key the credential is resolved from by default
pub const DEFAULT_CREDENTIAL_VAR: &str = "apikey";

const REDACTED: &str = "***";

/// Location for API key placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Place in query parameter
    #[default]
    Query,
    /// Place in HTTP header
    Header,
}

/// Per-account API key
///
/// `Debug` output is redacted and there is no `Display` impl, so the key
/// cannot end up in logs or error messages by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Create a credential, rejecting empty or malformed keys
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self(key))
    }

    /// Resolve the credential from a key/value store such as the process environment
    pub fn from_vars<I, K, V>(vars: I, name: &str) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        vars.into_iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.into())
            .ok_or_else(|| Error::config(format!("No API key found under '{name}'")))
            .and_then(Self::new)
    }

    /// Resolve the credential from the `apikey` environment variable
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars(), DEFAULT_CREDENTIAL_VAR)
    }

    /// Replace every occurrence of the key in `text`
    pub fn redact(&self, text: &str) -> String {
        text.replace(&self.0, REDACTED)
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&REDACTED).finish()
    }
}

/// Keys are printable ASCII without whitespace
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::config("API key is empty"));
    }
    if !key.chars().all(|c| c.is_ascii_graphic()) {
        return Err(Error::config(
            "API key contains whitespace or non-printable characters",
        ));
    }
    Ok(())
}
