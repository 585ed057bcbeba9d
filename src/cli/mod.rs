//! CLI module
//!
//! Command-line interface over the session. Records are printed to stdout
//! as JSON lines; logs go to stderr.
//!
//! # Commands
//!
//! - `sites` - List sites, optionally filtered
//! - `site`, `overview`, `period`, `benefits` - One site-level record
//! - `inverters`, `components` - Equipment of a site
//! - `telemetry` - Inverter telemetry over a time range
//! - `power`, `energy`, `timeframe` - Site time series and totals
//! - `energy-details`, `power-details` - Series per meter
//! - `flow`, `storage` - Live power flow and battery telemetry
//! - `version` - Current or supported API versions

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
