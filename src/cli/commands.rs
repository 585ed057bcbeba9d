//! CLI commands and argument parsing

use crate::endpoints::{SiteStatus, SystemUnits};
use crate::models::{timestamp, MeterType, TimeUnit};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SolarEdge monitoring API client
///
/// The API key is read from the `apikey` environment variable.
#[derive(Parser, Debug)]
#[command(name = "solaredge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List sites
    Sites {
        /// Free-text search
        #[arg(long)]
        search: Option<String>,

        /// Status filter (active, pending, disabled, all); repeatable
        #[arg(long, value_parser = parse_status)]
        status: Vec<SiteStatus>,
    },

    /// Show site details
    Site { site_id: u64 },

    /// List inverters of a site
    Inverters { site_id: u64 },

    /// List reporting equipment of a site
    Components { site_id: u64 },

    /// Inverter telemetry for a time range
    Telemetry {
        site_id: u64,

        /// Inverter serial number
        serial: String,

        /// Range start (`YYYY-MM-DD hh:mm:ss` or `YYYY-MM-DD`)
        #[arg(long, value_parser = parse_timestamp)]
        start: NaiveDateTime,

        /// Range end (`YYYY-MM-DD hh:mm:ss` or `YYYY-MM-DD`)
        #[arg(long, value_parser = parse_timestamp)]
        end: NaiveDateTime,
    },

    /// Site power for a time range of at most a month
    Power {
        site_id: u64,

        #[arg(long, value_parser = parse_timestamp)]
        start: NaiveDateTime,

        #[arg(long, value_parser = parse_timestamp)]
        end: NaiveDateTime,
    },

    /// Site energy per time unit for a date range
    Energy {
        site_id: u64,

        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,

        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,

        /// quarter_of_an_hour, hour, day, week, month or year
        #[arg(long, default_value = "day", value_parser = parse_time_unit)]
        unit: TimeUnit,
    },

    /// Site energy between two dates with lifetime readings
    Timeframe {
        site_id: u64,

        #[arg(long, value_parser = parse_date)]
        start: NaiveDate,

        #[arg(long, value_parser = parse_date)]
        end: NaiveDate,
    },

    /// Energy per meter for a time range
    EnergyDetails {
        site_id: u64,

        #[arg(long, value_parser = parse_timestamp)]
        start: NaiveDateTime,

        #[arg(long, value_parser = parse_timestamp)]
        end: NaiveDateTime,

        #[arg(long, default_value = "day", value_parser = parse_time_unit)]
        unit: TimeUnit,

        /// production, consumption, self_consumption, feed_in or purchased; repeatable
        #[arg(long, value_parser = parse_meter)]
        meter: Vec<MeterType>,
    },

    /// Power per meter for a time range of at most a month
    PowerDetails {
        site_id: u64,

        #[arg(long, value_parser = parse_timestamp)]
        start: NaiveDateTime,

        #[arg(long, value_parser = parse_timestamp)]
        end: NaiveDateTime,

        #[arg(long, value_parser = parse_meter)]
        meter: Vec<MeterType>,
    },

    /// Live power flow of a site
    Flow { site_id: u64 },

    /// Battery telemetry for a time range of at most a week
    Storage {
        site_id: u64,

        #[arg(long, value_parser = parse_timestamp)]
        start: NaiveDateTime,

        #[arg(long, value_parser = parse_timestamp)]
        end: NaiveDateTime,

        /// Battery serial number; repeatable, all batteries when absent
        #[arg(long)]
        serial: Vec<String>,
    },

    /// Environmental benefits of a site
    Benefits {
        site_id: u64,

        /// metrics or imperial
        #[arg(long, default_value = "metrics", value_parser = parse_units)]
        units: SystemUnits,
    },

    /// Site overview
    Overview { site_id: u64 },

    /// First and last day with data
    Period { site_id: u64 },

    /// API version
    Version {
        /// List every supported version instead of the current one
        #[arg(long)]
        supported: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Indented JSON
    Pretty,
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    timestamp::parse(s).ok_or_else(|| format!("invalid timestamp '{s}'"))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), timestamp::DATE_FORMAT)
        .map_err(|e| format!("invalid date '{s}': {e}"))
}

fn parse_status(s: &str) -> Result<SiteStatus, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

fn parse_time_unit(s: &str) -> Result<TimeUnit, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

fn parse_meter(s: &str) -> Result<MeterType, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

fn parse_units(s: &str) -> Result<SystemUnits, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}
