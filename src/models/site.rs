//! Site records

use super::measurement::Measurement;
use super::timestamp;
use crate::decode::Record;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A monitored installation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Site ID used by every site-scoped endpoint
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub account_id: Option<u64>,
    #[serde(default)]
    pub status: Option<String>,
    /// Peak power in kWp
    #[serde(default)]
    pub peak_power: Measurement,
    #[serde(default, with = "timestamp::option")]
    pub last_update_time: Option<NaiveDateTime>,
    #[serde(default, with = "timestamp::option")]
    pub installation_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub pto_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, rename = "type")]
    pub site_type: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub location: Option<SiteLocation>,
    #[serde(default)]
    pub primary_module: Option<PrimaryModule>,
    #[serde(default)]
    pub alert_quantity: Option<u32>,
    #[serde(default)]
    pub alert_severity: Option<String>,
    #[serde(default)]
    pub public_settings: Option<PublicSettings>,
}

impl Record for Site {
    const KIND: &'static str = "site";
    const REQUIRED: &'static [&'static str] = &["id", "name"];
}

/// Postal location of a site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteLocation {
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub address2: Option<String>,
    pub zip: Option<String>,
    pub time_zone: Option<String>,
    pub country_code: Option<String>,
}

/// Main PV module installed at a site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrimaryModule {
    pub manufacturer_name: Option<String>,
    pub model_name: Option<String>,
    pub maximum_power: Measurement,
    pub temperature_coef: Measurement,
}

/// Public visibility settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublicSettings {
    pub is_public: bool,
    pub name: Option<String>,
}

/// Start and end of the data recorded for a site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataPeriod {
    /// `None` when the site has produced no data yet
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

impl Record for DataPeriod {
    const KIND: &'static str = "data period";
    const REQUIRED: &'static [&'static str] = &[];
}

/// Service API version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub release: String,
}

impl Record for Version {
    const KIND: &'static str = "version";
    const REQUIRED: &'static [&'static str] = &["release"];
}
