//! Battery storage telemetry

use super::measurement::Measurement;
use super::timestamp;
use crate::decode::Record;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Storage telemetry of every battery at a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageData {
    #[serde(default)]
    pub battery_count: u32,
    pub batteries: Vec<StorageBattery>,
}

impl Record for StorageData {
    const KIND: &'static str = "storage data";
    const REQUIRED: &'static [&'static str] = &["batteries"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageBattery {
    pub serial_number: String,
    #[serde(default)]
    pub model_number: Option<String>,
    /// Capacity in Wh
    #[serde(default)]
    pub nameplate: Measurement,
    #[serde(default)]
    pub telemetry_count: Option<u64>,
    #[serde(default)]
    pub telemetries: Vec<BatteryTelemetry>,
}

/// One battery sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryTelemetry {
    #[serde(with = "timestamp")]
    pub time_stamp: NaiveDateTime,
    /// Positive when charging, negative when discharging
    #[serde(default)]
    pub power: Measurement,
    #[serde(default)]
    pub battery_state: Option<u8>,
    #[serde(default)]
    pub life_time_energy_charged: Measurement,
    #[serde(default)]
    pub life_time_energy_discharged: Measurement,
    #[serde(default)]
    pub full_pack_energy_available: Measurement,
    #[serde(default)]
    pub internal_temp: Measurement,
    #[serde(rename = "ACGridCharging", default)]
    pub ac_grid_charging: Measurement,
    #[serde(default)]
    pub state_of_charge: Measurement,
}
