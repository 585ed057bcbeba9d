//! Decoder types and traits

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Outcome of inspecting a raw response
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// 2xx with a JSON body
    Success(Value),
    /// The service refused the call as over quota
    RateLimited {
        /// Delay the service asked for, if any
        retry_after: Option<Duration>,
    },
    /// 401 or 403
    AuthFailed { status: u16 },
    /// 404
    NotFound,
    /// 400 and other client errors
    InvalidRequest { status: u16, message: String },
    /// 5xx
    ServerError { status: u16 },
    /// 2xx whose body cannot be used, or an unexpected status
    Malformed { message: String },
}

impl Classification {
    /// Short name for logging
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::RateLimited { .. } => "rate_limited",
            Self::AuthFailed { .. } => "auth_failed",
            Self::NotFound => "not_found",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::ServerError { .. } => "server_error",
            Self::Malformed { .. } => "malformed",
        }
    }
}

/// A typed record with an explicit schema
///
/// `REQUIRED` lists the JSON keys that must be present and non-null. Any
/// other field may be missing and falls back to its serde default.
pub trait Record: DeserializeOwned + Send + 'static {
    /// Record kind used in error messages
    const KIND: &'static str;

    /// JSON keys that must be present
    const REQUIRED: &'static [&'static str];
}

/// Where records live in a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordShape {
    /// Dot path to the record array (or single record)
    pub records_path: &'static str,
    /// Dot path to the total count reported by the service
    pub total_path: Option<&'static str>,
}

impl RecordShape {
    /// Shape with records at `path` and no reported total
    pub const fn at(path: &'static str) -> Self {
        Self {
            records_path: path,
            total_path: None,
        }
    }

    /// Shape with records at `path` and a total count at `total`
    pub const fn counted(path: &'static str, total: &'static str) -> Self {
        Self {
            records_path: path,
            total_path: Some(total),
        }
    }
}

/// One decoded page
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records in service order
    pub records: Vec<T>,
    /// Total count reported by the service
    pub reported_total: Option<u64>,
}
