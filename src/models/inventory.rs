//! Equipment records

use super::measurement::Measurement;
use crate::decode::Record;
use serde::{Deserialize, Serialize};

/// An inverter from a site's inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inverter {
    /// Serial number, used to request telemetry
    #[serde(rename = "SN")]
    pub serial_number: String,
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub communication_method: Option<String>,
    #[serde(default)]
    pub cpu_version: Option<String>,
    #[serde(default)]
    pub connected_optimizers: Option<u32>,
}

impl Record for Inverter {
    const KIND: &'static str = "inverter";
    const REQUIRED: &'static [&'static str] = &["SN", "name"];
}

/// An entry of the site component list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub serial_number: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Installed DC capacity in kWp
    #[serde(default, rename = "kWpDC")]
    pub kwp_dc: Measurement,
}

impl Record for Component {
    const KIND: &'static str = "component";
    const REQUIRED: &'static [&'static str] = &["serialNumber"];
}
