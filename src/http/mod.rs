//! HTTP layer
//!
//! Provides the transport seam plus the retrying dispatcher built on it.
//!
//! # Features
//!
//! - **Transport trait**: one request in, one raw response out
//! - **Rate State**: shared quota estimate and next-allowed time per session
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Retry budgets**: separate budgets for throttling, transport and server failures

mod dispatcher;
mod rate_limit;
mod request;
mod transport;

pub use dispatcher::{Dispatcher, RetryBudget};
pub use rate_limit::{Backoff, RateLimiter, RateState};
pub use request::{RawResponse, RequestSpec};
pub use transport::{HttpTransport, Transport, TransportFailure};

#[cfg(test)]
pub(crate) mod testing;
