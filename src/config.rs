//! Client configuration
//!
//! `ClientConfig` carries every option a `Session` recognizes. It can be
//! built in code through [`ClientConfig::builder`] or loaded from YAML.
//! All fields have defaults, so an empty document is a valid config.

use crate::auth::Location;
use crate::error::{Error, Result};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default SolarEdge monitoring API endpoint
pub const DEFAULT_BASE_URL: &str = "https://monitoringapi.solaredge.com";

/// Largest page the vendor accepts for list endpoints
pub const MAX_PAGE_SIZE: u32 = 100;

/// Longest time window the vendor accepts for equipment telemetry
pub const MAX_WINDOW_DAYS: u32 = 7;

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Retry budget for throttled calls
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry budget for connection failures and timeouts
    #[serde(default = "default_transport_retries")]
    pub transport_retries: u32,

    /// Retry budget for 5xx responses
    #[serde(default = "default_server_retries")]
    pub server_retries: u32,

    /// Records requested per page on list endpoints
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub backoff: BackoffConfig,

    /// Where the API key goes on each request
    #[serde(default)]
    pub auth: AuthPlacement,

    /// How the service signals throttling
    #[serde(default)]
    pub throttle: ThrottleConfig,

    /// Paging parameter names and limits
    #[serde(default)]
    pub paging: PagingConfig,

    /// Client-side request pacing
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            transport_retries: default_transport_retries(),
            server_retries: default_server_retries(),
            page_size: default_page_size(),
            backoff: BackoffConfig::default(),
            auth: AuthPlacement::default(),
            throttle: ThrottleConfig::default(),
            paging: PagingConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_transport_retries() -> u32 {
    2
}

fn default_server_retries() -> u32 {
    1
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parse a config from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Parsed base URL
    pub fn parsed_base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("Invalid base URL '{}': {e}", self.base_url)))
    }

    /// Check the config for values no session can work with
    pub fn validate(&self) -> Result<()> {
        let url = self.parsed_base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Base URL must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::config("timeout_seconds must be positive"));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::config(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        if self.backoff.max_ms < self.backoff.initial_ms {
            return Err(Error::config("backoff.max_ms must not be below backoff.initial_ms"));
        }
        if self.paging.offset_param.is_empty() || self.paging.limit_param.is_empty() {
            return Err(Error::config("paging parameter names must not be empty"));
        }
        if self.paging.max_window_days == 0 || self.paging.max_window_days > MAX_WINDOW_DAYS {
            return Err(Error::config(format!(
                "paging.max_window_days must be between 1 and {MAX_WINDOW_DAYS}, got {}",
                self.paging.max_window_days
            )));
        }
        match self.auth.location {
            Location::Query if self.auth.query_param.is_empty() => {
                return Err(Error::config("auth.query_param must not be empty"));
            }
            Location::Header if self.auth.header_name.is_empty() => {
                return Err(Error::config("auth.header_name must not be empty"));
            }
            _ => {}
        }
        if let Some(rps) = self.rate_limit.requests_per_second {
            if rps == 0 {
                return Err(Error::config("rate_limit.requests_per_second must be positive"));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Nested Sections
// ============================================================================

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Base interval in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    1000
}

fn default_max_ms() -> u64 {
    60000
}

/// API key placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPlacement {
    /// Query parameter or header
    #[serde(default = "default_location")]
    pub location: Location,

    /// Query parameter name
    #[serde(default = "default_query_param")]
    pub query_param: String,

    /// Header name
    #[serde(default = "default_header_name")]
    pub header_name: String,
}

impl Default for AuthPlacement {
    fn default() -> Self {
        Self {
            location: default_location(),
            query_param: default_query_param(),
            header_name: default_header_name(),
        }
    }
}

fn default_location() -> Location {
    Location::Query
}

fn default_query_param() -> String {
    "api_key".to_string()
}

fn default_header_name() -> String {
    "X-API-Key".to_string()
}

/// Throttle signaling policy
///
/// Vendors differ: some answer 429, others answer 200 with a quota field.
/// Both are recognized when configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Status codes that mean "over quota"
    #[serde(default = "default_throttle_statuses")]
    pub statuses: Vec<u16>,

    /// Dot path to a remaining-quota field in success bodies; zero or less means throttled
    #[serde(default)]
    pub quota_field: Option<String>,

    /// Header reporting remaining quota
    #[serde(default = "default_remaining_header")]
    pub remaining_header: String,

    /// Header carrying the server's retry delay in seconds
    #[serde(default = "default_retry_after_header")]
    pub retry_after_header: String,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            statuses: default_throttle_statuses(),
            quota_field: None,
            remaining_header: default_remaining_header(),
            retry_after_header: default_retry_after_header(),
        }
    }
}

fn default_throttle_statuses() -> Vec<u16> {
    vec![429]
}

fn default_remaining_header() -> String {
    "X-RateLimit-Remaining".to_string()
}

fn default_retry_after_header() -> String {
    "Retry-After".to_string()
}

/// Paging parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Query parameter carrying the page offset
    #[serde(default = "default_offset_param")]
    pub offset_param: String,

    /// Query parameter carrying the page size
    #[serde(default = "default_limit_param")]
    pub limit_param: String,

    /// Longest time window per telemetry request, in days
    #[serde(default = "default_max_window_days")]
    pub max_window_days: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            offset_param: default_offset_param(),
            limit_param: default_limit_param(),
            max_window_days: default_max_window_days(),
        }
    }
}

fn default_offset_param() -> String {
    "startIndex".to_string()
}

fn default_limit_param() -> String {
    "size".to_string()
}

fn default_max_window_days() -> u32 {
    MAX_WINDOW_DAYS
}

/// Client-side pacing configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per second; unpaced when absent
    #[serde(default)]
    pub requests_per_second: Option<u32>,
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_seconds = timeout.as_secs().max(1);
        self
    }

    /// Set the throttle retry budget
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the transport retry budget
    pub fn transport_retries(mut self, retries: u32) -> Self {
        self.config.transport_retries = retries;
        self
    }

    /// Set the server error retry budget
    pub fn server_retries(mut self, retries: u32) -> Self {
        self.config.server_retries = retries;
        self
    }

    /// Set the page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff = BackoffConfig {
            backoff_type,
            initial_ms: initial.as_millis() as u64,
            max_ms: max.as_millis() as u64,
        };
        self
    }

    /// Send the API key as a query parameter
    pub fn key_in_query(mut self, param: impl Into<String>) -> Self {
        self.config.auth.location = Location::Query;
        self.config.auth.query_param = param.into();
        self
    }

    /// Send the API key as a header
    pub fn key_in_header(mut self, header: impl Into<String>) -> Self {
        self.config.auth.location = Location::Header;
        self.config.auth.header_name = header.into();
        self
    }

    /// Set the throttle policy
    pub fn throttle(mut self, throttle: ThrottleConfig) -> Self {
        self.config.throttle = throttle;
        self
    }

    /// Set paging parameter names
    pub fn paging(mut self, offset_param: impl Into<String>, limit_param: impl Into<String>) -> Self {
        self.config.paging.offset_param = offset_param.into();
        self.config.paging.limit_param = limit_param.into();
        self
    }

    /// Set the telemetry window length
    pub fn max_window_days(mut self, days: u32) -> Self {
        self.config.paging.max_window_days = days;
        self
    }

    /// Pace requests client-side
    pub fn requests_per_second(mut self, rps: u32) -> Self {
        self.config.rate_limit.requests_per_second = Some(rps);
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
