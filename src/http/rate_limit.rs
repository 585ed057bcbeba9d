//! Rate limiting and backoff
//!
//! `RateState` is the session's local view of the vendor quota. Every call
//! reads it before going out and every response updates it. Updates are
//! best-effort: the remaining-quota estimate is last-writer-wins while the
//! next-allowed time only ever moves forward.
//!
//! Optional client-side pacing uses the governor crate.

use crate::config::{BackoffConfig, RateLimitConfig};
use crate::types::BackoffType;
use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Local estimate of the vendor quota
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateState {
    /// Remaining requests reported by the service
    pub remaining: Option<u64>,
    /// Earliest time the next call may go out
    pub next_allowed: Option<Instant>,
}

impl RateState {
    /// Push the next-allowed time forward, never backward
    pub fn defer_until(&mut self, at: Instant) {
        self.next_allowed = Some(match self.next_allowed {
            Some(current) if current > at => current,
            _ => at,
        });
    }

    /// Record the remaining quota reported by the service
    pub fn set_remaining(&mut self, remaining: u64) {
        self.remaining = Some(remaining);
    }

    /// How long a caller must wait from `now`
    pub fn wait_from(&self, now: Instant) -> Option<Duration> {
        self.next_allowed
            .filter(|at| *at > now)
            .map(|at| at - now)
    }
}

/// Exponential (or constant/linear) retry schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    backoff_type: BackoffType,
    base: Duration,
    max: Duration,
}

impl Backoff {
    /// Create a backoff schedule
    pub fn new(backoff_type: BackoffType, base: Duration, max: Duration) -> Self {
        Self {
            backoff_type,
            base,
            max,
        }
    }

    /// Delay after the given number of failed attempts (1 = first failure)
    pub fn delay(&self, failures: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => self.base,
            BackoffType::Linear => self.base.saturating_mul(failures.max(1)),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(failures);
                self.base.saturating_mul(factor)
            }
        };

        self.cap(delay)
    }

    /// Longest delay the schedule allows
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Clamp a delay to the schedule maximum
    pub fn cap(&self, delay: Duration) -> Duration {
        std::cmp::min(delay, self.max)
    }
}

impl From<&BackoffConfig> for Backoff {
    fn from(config: &BackoffConfig) -> Self {
        Self::new(
            config.backoff_type,
            Duration::from_millis(config.initial_ms),
            Duration::from_millis(config.max_ms),
        )
    }
}

/// Fallback deferral when the backoff maximum does not fit in an `Instant`
const MAX_DEFERRAL: Duration = Duration::from_secs(24 * 60 * 60);

type Pacer = Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Gatekeeper consulted before every call
#[derive(Clone)]
pub struct RateLimiter {
    state: Arc<Mutex<RateState>>,
    backoff: Backoff,
    pacer: Option<Arc<Pacer>>,
}

impl RateLimiter {
    /// Create a rate limiter
    pub fn new(backoff: Backoff, pacing: &RateLimitConfig) -> Self {
        let pacer = pacing
            .requests_per_second
            .and_then(NonZeroU32::new)
            .map(|rps| Arc::new(Governor::direct(Quota::per_second(rps))));

        Self {
            state: Arc::new(Mutex::new(RateState::default())),
            backoff,
            pacer,
        }
    }

    /// Retry schedule in use
    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Snapshot of the current state
    pub fn snapshot(&self) -> RateState {
        *self.lock()
    }

    /// Suspend until the next call is allowed
    pub async fn acquire(&self) {
        loop {
            let wait = self.lock().wait_from(Instant::now());
            match wait {
                Some(delay) => {
                    debug!("Waiting {delay:?} for rate limit window");
                    tokio::time::sleep(delay).await;
                }
                None => break,
            }
        }

        if let Some(ref pacer) = self.pacer {
            pacer.until_ready().await;
        }
    }

    /// Record a throttled response, holding off all callers for `delay`
    pub fn record_throttled(&self, delay: Duration) {
        let at = self.deadline(delay);
        let mut state = self.lock();
        state.set_remaining(0);
        state.defer_until(at);
    }

    /// Record a successful response
    pub fn record_success(&self, remaining: Option<u64>) {
        if let Some(remaining) = remaining {
            self.lock().set_remaining(remaining);
        }
    }

    /// `now + delay`, with the delay clamped to the backoff maximum
    fn deadline(&self, delay: Duration) -> Instant {
        let now = Instant::now();
        let delay = self.backoff.cap(delay);
        now.checked_add(delay)
            .or_else(|| now.checked_add(MAX_DEFERRAL))
            .unwrap_or(now)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("state", &self.snapshot())
            .field("backoff", &self.backoff)
            .field("paced", &self.pacer.is_some())
            .finish()
    }
}
