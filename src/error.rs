//! Error types for the SolarEdge client
//!
//! Every public operation returns `Result<T, Error>`. The variants follow the
//! retry taxonomy used by the dispatcher: some kinds are surfaced at once,
//! others only after their internal retry budget is spent.

use thiserror::Error;

/// The main error type for the SolarEdge client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Local Errors (never retried)
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to write JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Service Rejections (never retried)
    // ============================================================================
    #[error("Authentication failed with HTTP {status}, check the API key")]
    AuthFailed { status: u16 },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Malformed {record} response{}: {message}", field_suffix(.field))]
    MalformedResponse {
        record: String,
        field: Option<String>,
        message: String,
    },

    // ============================================================================
    // Exhausted Retries
    // ============================================================================
    #[error("Rate limit exceeded after {attempts} attempts")]
    RateLimitExceeded { attempts: u32 },

    #[error("Transport error after {attempts} attempts: {message}")]
    Transport { attempts: u32, message: String },

    #[error("Server error HTTP {status} after {attempts} attempts")]
    ServerError { status: u16, attempts: u32 },
}

fn field_suffix(field: &Option<String>) -> String {
    field
        .as_ref()
        .map(|f| format!(" (field '{f}')"))
        .unwrap_or_default()
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed(
        record: impl Into<String>,
        field: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedResponse {
            record: record.into(),
            field,
            message: message.into(),
        }
    }

    /// Name of the offending field for a malformed response, when known
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// Check if a later attempt by the caller could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::RateLimitExceeded { .. } | Error::Transport { .. } | Error::ServerError { .. }
        )
    }
}

/// Result type alias for the SolarEdge client
pub type Result<T> = std::result::Result<T, Error>;
