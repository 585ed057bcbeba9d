//! Energy, power and environmental benefit records

use super::measurement::Measurement;
use super::timestamp;
use crate::decode::Record;
use crate::error::Error;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Aggregation granularity for time series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeUnit {
    QuarterOfAnHour,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QuarterOfAnHour => "QUARTER_OF_AN_HOUR",
            Self::Hour => "HOUR",
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Month => "MONTH",
            Self::Year => "YEAR",
        }
    }

    /// Longest range the service accepts at this granularity
    pub fn max_span(self) -> Option<Duration> {
        match self {
            Self::QuarterOfAnHour | Self::Hour => Some(Duration::days(31)),
            Self::Day => Some(Duration::days(366)),
            Self::Week | Self::Month | Self::Year => None,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "QUARTER_OF_AN_HOUR" | "QUARTER" => Ok(Self::QuarterOfAnHour),
            "HOUR" => Ok(Self::Hour),
            "DAY" => Ok(Self::Day),
            "WEEK" => Ok(Self::Week),
            "MONTH" => Ok(Self::Month),
            "YEAR" => Ok(Self::Year),
            _ => Err(Error::invalid_request(format!("unknown time unit '{s}'"))),
        }
    }
}

/// Energy or power values over time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    #[serde(default)]
    pub time_unit: Option<TimeUnit>,
    /// Unit of every value (`W`, `Wh`)
    pub unit: String,
    #[serde(default)]
    pub measured_by: Option<String>,
    pub values: Vec<SeriesValue>,
}

impl Record for TimeSeries {
    const KIND: &'static str = "time series";
    const REQUIRED: &'static [&'static str] = &["unit", "values"];
}

/// A single point of a time series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesValue {
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub value: Measurement,
}

/// Site overview with lifetime and recent totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    #[serde(with = "timestamp")]
    pub last_update_time: NaiveDateTime,
    #[serde(default)]
    pub life_time_data: EnergySummary,
    #[serde(default)]
    pub last_year_data: EnergySummary,
    #[serde(default)]
    pub last_month_data: EnergySummary,
    #[serde(default)]
    pub last_day_data: EnergySummary,
    #[serde(default)]
    pub current_power: CurrentPower,
    #[serde(default)]
    pub measured_by: Option<String>,
}

impl Record for Overview {
    const KIND: &'static str = "overview";
    const REQUIRED: &'static [&'static str] = &["lastUpdateTime"];
}

/// Energy produced over a period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergySummary {
    /// Energy in Wh
    pub energy: Measurement,
    pub revenue: Measurement,
}

/// Instantaneous power
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentPower {
    /// Power in W
    pub power: Measurement,
}

/// Environmental benefits of a site's production
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvBenefits {
    pub gas_emission_saved: GasEmissionSaved,
    #[serde(default)]
    pub trees_planted: Measurement,
    #[serde(default)]
    pub light_bulbs: Measurement,
}

impl Record for EnvBenefits {
    const KIND: &'static str = "environmental benefits";
    const REQUIRED: &'static [&'static str] = &["gasEmissionSaved"];
}

/// Avoided emissions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasEmissionSaved {
    pub units: Option<String>,
    pub co2: Measurement,
    pub so2: Measurement,
    pub nox: Measurement,
}

/// Energy produced between two dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeFrameEnergy {
    #[serde(default)]
    pub energy: Measurement,
    pub unit: String,
    #[serde(default)]
    pub measured_by: Option<String>,
    #[serde(default)]
    pub start_lifetime_energy: Option<LifetimeEnergy>,
    #[serde(default)]
    pub end_lifetime_energy: Option<LifetimeEnergy>,
}

impl Record for TimeFrameEnergy {
    const KIND: &'static str = "time frame energy";
    const REQUIRED: &'static [&'static str] = &["unit"];
}

/// Lifetime meter reading on a given day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifetimeEnergy {
    pub date: Option<chrono::NaiveDate>,
    pub unit: Option<String>,
    pub energy: Measurement,
}

// ============================================================================
// Meter Details
// ============================================================================

/// Meter a detailed series comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeterType {
    Production,
    Consumption,
    SelfConsumption,
    FeedIn,
    Purchased,
    /// A meter this client does not know yet
    #[serde(other)]
    Unknown,
}

impl MeterType {
    /// Wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "Production",
            Self::Consumption => "Consumption",
            Self::SelfConsumption => "SelfConsumption",
            Self::FeedIn => "FeedIn",
            Self::Purchased => "Purchased",
            Self::Unknown => "Unknown",
        }
    }
}

impl FromStr for MeterType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "production" => Ok(Self::Production),
            "consumption" => Ok(Self::Consumption),
            "selfconsumption" => Ok(Self::SelfConsumption),
            "feedin" => Ok(Self::FeedIn),
            "purchased" => Ok(Self::Purchased),
            _ => Err(Error::invalid_request(format!("unknown meter '{s}'"))),
        }
    }
}

/// Energy or power per meter over time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterDetails {
    #[serde(default)]
    pub time_unit: Option<TimeUnit>,
    pub unit: String,
    pub meters: Vec<MeterSeries>,
}

impl MeterDetails {
    /// Series of one meter, if the service returned it
    pub fn meter(&self, meter_type: MeterType) -> Option<&MeterSeries> {
        self.meters.iter().find(|m| m.meter_type == meter_type)
    }
}

impl Record for MeterDetails {
    const KIND: &'static str = "meter details";
    const REQUIRED: &'static [&'static str] = &["unit", "meters"];
}

/// Values of a single meter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterSeries {
    #[serde(rename = "type")]
    pub meter_type: MeterType,
    #[serde(default)]
    pub values: Vec<SeriesValue>,
}
