//! Request dispatch with retry
//!
//! The dispatcher runs one logical call: wait for the rate window, attach
//! the API key, send, classify, and retry according to the kind of failure.
//! Each failure kind has its own budget:
//!
//! - throttled responses: `max_retries`, then `RateLimitExceeded`
//! - connection failures and timeouts: `transport_retries`, then `Transport`
//! - 5xx responses: `server_retries`, then `ServerError`
//!
//! Everything else is surfaced on the first occurrence. Only throttled
//! responses move the shared next-allowed time; the other retries wait in
//! the failing call alone. Every delay is capped at the backoff maximum,
//! including one requested through `Retry-After`.

use super::rate_limit::{Backoff, RateLimiter, RateState};
use super::request::RequestSpec;
use super::transport::Transport;
use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::decode::{Classification, ResponseValidator};
use crate::error::{Error, Result};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry budgets per failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    pub throttled: u32,
    pub transport: u32,
    pub server: u32,
}

impl From<&ClientConfig> for RetryBudget {
    fn from(config: &ClientConfig) -> Self {
        Self {
            throttled: config.max_retries,
            transport: config.transport_retries,
            server: config.server_retries,
        }
    }
}

/// Runs authenticated, throttled, validated calls
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    authenticator: Authenticator,
    limiter: RateLimiter,
    validator: ResponseValidator,
    budget: RetryBudget,
    timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher
    pub fn new(
        transport: Arc<dyn Transport>,
        authenticator: Authenticator,
        config: &ClientConfig,
    ) -> Self {
        Self {
            transport,
            authenticator,
            limiter: RateLimiter::new(Backoff::from(&config.backoff), &config.rate_limit),
            validator: ResponseValidator::new(config.throttle.clone()),
            budget: RetryBudget::from(config),
            timeout: config.timeout(),
        }
    }

    /// Snapshot of the rate state
    pub fn rate_state(&self) -> RateState {
        self.limiter.snapshot()
    }

    /// Execute a request and return its validated JSON body
    pub async fn execute(&self, request: &RequestSpec) -> Result<Value> {
        let backoff = self.limiter.backoff();
        let mut throttled = 0u32;
        let mut transport_failures = 0u32;
        let mut server_failures = 0u32;

        loop {
            self.limiter.acquire().await;
            let signed = self.authenticator.apply(request)?;

            let raw = match self.transport.send(&signed, self.timeout).await {
                Ok(raw) => raw,
                Err(failure) => {
                    transport_failures += 1;
                    let attempts = throttled + transport_failures + server_failures;
                    let message = self.authenticator.redact(&failure.to_string());
                    if !failure.is_retryable() || transport_failures > self.budget.transport {
                        warn!("{} failed after {attempts} attempts: {message}", request.path);
                        return Err(Error::Transport { attempts, message });
                    }
                    let delay = backoff.delay(transport_failures);
                    warn!(
                        "{message} on {}, attempt {}/{}, retrying in {delay:?}",
                        request.path,
                        transport_failures,
                        self.budget.transport + 1
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
            };

            match self.validator.classify(&raw) {
                Classification::Success(body) => {
                    let remaining = self.validator.remaining_quota(&raw, Some(&body));
                    self.limiter.record_success(remaining);
                    debug!("{} succeeded", request.path);
                    return Ok(body);
                }
                Classification::RateLimited { retry_after } => {
                    throttled += 1;
                    if throttled > self.budget.throttled {
                        warn!("{} still throttled after {throttled} attempts", request.path);
                        return Err(Error::RateLimitExceeded {
                            attempts: throttled + transport_failures + server_failures,
                        });
                    }
                    let requested = retry_after.unwrap_or_default();
                    let delay = backoff.cap(backoff.delay(throttled).max(requested));
                    warn!(
                        "Rate limited on {}, attempt {}/{}, retrying in {delay:?}",
                        request.path,
                        throttled,
                        self.budget.throttled + 1
                    );
                    self.limiter.record_throttled(delay);
                }
                Classification::ServerError { status } => {
                    server_failures += 1;
                    if server_failures > self.budget.server {
                        return Err(Error::ServerError {
                            status,
                            attempts: throttled + transport_failures + server_failures,
                        });
                    }
                    let delay = backoff.delay(server_failures);
                    warn!(
                        "HTTP {status} on {}, attempt {}/{}, retrying in {delay:?}",
                        request.path,
                        server_failures,
                        self.budget.server + 1
                    );
                    tokio::time::sleep(delay).await;
                }
                Classification::AuthFailed { status } => {
                    return Err(Error::AuthFailed { status });
                }
                Classification::NotFound => {
                    return Err(Error::NotFound {
                        resource: request.path.clone(),
                    });
                }
                Classification::InvalidRequest { status, message } => {
                    return Err(Error::invalid_request(format!(
                        "HTTP {status} from {}: {}",
                        request.path,
                        self.authenticator.redact(&message)
                    )));
                }
                Classification::Malformed { message } => {
                    return Err(Error::malformed("response", None, message));
                }
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("limiter", &self.limiter)
            .field("budget", &self.budget)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
