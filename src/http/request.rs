//! Request and response values
//!
//! A `RequestSpec` is built per call by the endpoint layer and is never
//! mutated in place: each builder method returns a new value. A
//! `RawResponse` is what the transport hands back before validation.

use crate::types::StringMap;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;

/// Description of a single logical request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// Endpoint path relative to the base URL
    pub path: String,
    /// HTTP method
    pub method: Method,
    /// Query parameters
    pub query: StringMap,
    /// Request headers
    pub headers: StringMap,
    /// Request body (JSON)
    pub body: Option<Value>,
}

impl RequestSpec {
    /// Create a GET request for a path
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::GET,
            query: StringMap::new(),
            headers: StringMap::new(),
            body: None,
        }
    }

    /// Add or replace a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter when a value is present
    #[must_use]
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Add or replace several query parameters
    #[must_use]
    pub fn with_query(mut self, params: StringMap) -> Self {
        self.query.extend(params);
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Undecoded response as received from the transport
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

impl RawResponse {
    /// Create a response with no headers
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Create a response with a JSON body
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = value.parse() {
            self.headers.insert(name, value);
        }
        self
    }

    /// Read a header as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body as lossy UTF-8, truncated for messages
    pub fn body_excerpt(&self, max_len: usize) -> String {
        let text = String::from_utf8_lossy(&self.body);
        let trimmed = text.trim();
        match trimmed.char_indices().nth(max_len) {
            Some((idx, _)) => format!("{}...", &trimmed[..idx]),
            None => trimmed.to_string(),
        }
    }
}
