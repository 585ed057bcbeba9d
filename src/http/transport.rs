//! Transport layer
//!
//! A transport issues exactly one HTTP request and reports what came back.
//! It knows nothing about retries, quotas or record shapes.

use super::request::{RawResponse, RequestSpec};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Failure to obtain any response at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Other(String),
}

impl TransportFailure {
    /// Connection failures and timeouts are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connect(_) | Self::Timeout(_))
    }
}

/// Issues single HTTP requests
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request with the given timeout
    async fn send(
        &self,
        request: &RequestSpec,
        timeout: Duration,
    ) -> std::result::Result<RawResponse, TransportFailure>;
}

/// reqwest-backed transport holding the pooled connections of a session
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Build a transport from client configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(format!("solaredge-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.parsed_base_url()?,
        })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> std::result::Result<Url, TransportFailure> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .map_err(|e| TransportFailure::Other(format!("invalid URL for '{path}': {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &RequestSpec,
        timeout: Duration,
    ) -> std::result::Result<RawResponse, TransportFailure> {
        let url = self.build_url(&request.path)?;

        let mut headers = HeaderMap::new();
        for (key, value) in &request.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| TransportFailure::Other(format!("invalid header name '{key}': {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| TransportFailure::Other(format!("invalid value for header '{key}'")))?;
            headers.insert(name, value);
        }

        let mut req = self
            .client
            .request(request.method.clone(), url)
            .headers(headers)
            .timeout(timeout);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| classify_failure(e, timeout))?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| classify_failure(e, timeout))?;

        debug!("{} {} -> {status}", request.method, request.path);
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Map a reqwest error, dropping the URL since it carries the API key
fn classify_failure(error: reqwest::Error, timeout: Duration) -> TransportFailure {
    if error.is_timeout() {
        TransportFailure::Timeout(timeout)
    } else if error.is_connect() {
        TransportFailure::Connect(error.without_url().to_string())
    } else {
        TransportFailure::Other(error.without_url().to_string())
    }
}
