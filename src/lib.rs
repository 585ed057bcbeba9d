// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # SolarEdge Monitoring Client
//!
//! An async client for the SolarEdge monitoring API. It turns logical
//! operations ("list sites", "inverter telemetry for last week") into
//! authenticated, throttled, validated HTTP calls and hands back typed
//! records.
//!
//! ## Features
//!
//! - **Typed records**: explicit schemas; unknown fields ignored, missing required fields reported by name
//! - **Lazy paging**: list endpoints stream records page by page
//! - **Throttle handling**: shared rate state, exponential backoff, separate retry budgets
//! - **Honest gaps**: `"NaN"` and empty readings decode as `Measurement::Unavailable`, never zero
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use solaredge_client::{ClientConfig, Credential, Session};
//!
//! #[tokio::main]
//! async fn main() -> solaredge_client::Result<()> {
//!     let session = Session::open(Credential::from_env()?, ClientConfig::default())?;
//!
//!     let mut sites = session.list_sites();
//!     while let Some(site) = sites.try_next().await? {
//!         println!("{} {}", site.id, site.name);
//!     }
//!
//!     session.close();
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Session (owns pool, credential, rate state)                 │
//! │    └─ Endpoint facade: list_sites, list_inverters, ...       │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────┬─────────────────┴─────┬────────────┬────────────┐
//! │   Pager   │  Dispatcher (retry)   │  Validator │   Models   │
//! ├───────────┼───────────────────────┼────────────┼────────────┤
//! │ Offset    │ Rate limiter/backoff  │ Status     │ Site       │
//! │ Windows   │ Auth (api_key)        │ Body shape │ Inverter   │
//! │ Single    │ Transport (reqwest)   │ Quota      │ Telemetry  │
//! └───────────┴───────────────────────┴────────────┴────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// API key handling
pub mod auth;

/// Transport, rate limiting and retrying dispatch
pub mod http;

/// Pagination strategies and the pager
pub mod pagination;

/// Response classification and record decoding
pub mod decode;

/// Typed records
pub mod models;

/// Client configuration
pub mod config;

/// Session lifecycle
pub mod session;

/// Endpoint facade
pub mod endpoints;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::Credential;
pub use config::ClientConfig;
pub use endpoints::{DateRange, SiteQuery, SiteStatus, SortOrder, SortProperty, SystemUnits, TimeRange};
pub use error::{Error, Result};
pub use models::Measurement;
pub use pagination::RecordStream;
pub use session::{open_session, Session};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
