//! Caller-supplied parameters
//!
//! Everything here is checked locally, before any request is built.

use crate::error::{Error, Result};
use crate::models::timestamp;
use crate::types::StringMap;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Ranges
// ============================================================================

/// Closed date-time range, site-local
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeRange {
    /// Create a range, rejecting a start after the end
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(Error::invalid_request(format!(
                "start {} is after end {}",
                timestamp::format(&start),
                timestamp::format(&end)
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Length of the range
    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    /// Reject ranges longer than `max`
    pub fn limit_span(self, max: Duration, what: &str) -> Result<Self> {
        check_span(self.span(), max, what)?;
        Ok(self)
    }
}

/// Closed date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting a start after the end
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::invalid_request(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Length of the range
    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    /// Reject ranges longer than `max`
    pub fn limit_span(self, max: Duration, what: &str) -> Result<Self> {
        check_span(self.span(), max, what)?;
        Ok(self)
    }
}

fn check_span(span: Duration, max: Duration, what: &str) -> Result<()> {
    if span > max {
        return Err(Error::invalid_request(format!(
            "{what} covers {} days, the service allows at most {}",
            span.num_days(),
            max.num_days()
        )));
    }
    Ok(())
}

// ============================================================================
// Site Listing
// ============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Site fields the service can sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    Name,
    Country,
    State,
    City,
    Address,
    Zip,
    Status,
    PeakPower,
    InstallationDate,
    Amount,
    MaxSeverity,
    CreationTime,
}

impl SortProperty {
    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Country => "Country",
            Self::State => "State",
            Self::City => "City",
            Self::Address => "Address",
            Self::Zip => "Zip",
            Self::Status => "Status",
            Self::PeakPower => "PeakPower",
            Self::InstallationDate => "InstallationDate",
            Self::Amount => "Amount",
            Self::MaxSeverity => "MaxSeverity",
            Self::CreationTime => "CreationTime",
        }
    }
}

/// Site status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    Active,
    Pending,
    Disabled,
    All,
}

impl SiteStatus {
    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Disabled => "Disabled",
            Self::All => "All",
        }
    }
}

impl FromStr for SiteStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "pending" => Ok(Self::Pending),
            "disabled" => Ok(Self::Disabled),
            "all" => Ok(Self::All),
            _ => Err(Error::invalid_request(format!("unknown site status '{s}'"))),
        }
    }
}

/// Filters for the site list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteQuery {
    pub search_text: Option<String>,
    pub sort_property: Option<SortProperty>,
    pub sort_order: Option<SortOrder>,
    pub status: Vec<SiteStatus>,
}

impl SiteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match sites by name, notes, email, address and the like
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn sort_by(mut self, property: SortProperty, order: SortOrder) -> Self {
        self.sort_property = Some(property);
        self.sort_order = Some(order);
        self
    }

    #[must_use]
    pub fn status(mut self, status: SiteStatus) -> Self {
        if !self.status.contains(&status) {
            self.status.push(status);
        }
        self
    }

    /// Query parameters for the filters that are set
    pub fn to_params(&self) -> StringMap {
        let mut params = StringMap::new();
        if let Some(text) = self.search_text.as_deref().filter(|t| !t.is_empty()) {
            params.insert("searchText".to_string(), text.to_string());
        }
        if let Some(property) = self.sort_property {
            params.insert("sortProperty".to_string(), property.as_str().to_string());
        }
        if let Some(order) = self.sort_order {
            params.insert("sortOrder".to_string(), order.as_str().to_string());
        }
        if !self.status.is_empty() {
            let statuses: Vec<&str> = self.status.iter().map(|s| s.as_str()).collect();
            params.insert("status".to_string(), statuses.join(","));
        }
        params
    }
}

// ============================================================================
// Units
// ============================================================================

/// Unit system for environmental benefits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SystemUnits {
    #[default]
    Metrics,
    Imperial,
}

impl SystemUnits {
    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metrics => "Metrics",
            Self::Imperial => "Imperial",
        }
    }
}

impl FromStr for SystemUnits {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "metric" | "metrics" => Ok(Self::Metrics),
            "imperial" => Ok(Self::Imperial),
            _ => Err(Error::invalid_request(format!("unknown unit system '{s}'"))),
        }
    }
}

impl fmt::Display for SystemUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
