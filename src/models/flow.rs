//! Live power flow between the parts of a site

use super::measurement::Measurement;
use crate::decode::Record;
use serde::{Deserialize, Serialize};

/// Current power flow of a site
///
/// Nodes are absent when the site has no such equipment, e.g. no battery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerFlow {
    /// Seconds until the service refreshes the flow
    #[serde(default)]
    pub update_refresh_rate: Option<u32>,
    /// Unit of every power value (`kW`)
    pub unit: String,
    #[serde(default)]
    pub connections: Vec<FlowConnection>,
    #[serde(rename = "GRID", default)]
    pub grid: Option<FlowNode>,
    #[serde(rename = "LOAD", default)]
    pub load: Option<FlowNode>,
    #[serde(rename = "PV", default)]
    pub pv: Option<FlowNode>,
    #[serde(rename = "STORAGE", default)]
    pub storage: Option<FlowNode>,
}

impl Record for PowerFlow {
    const KIND: &'static str = "power flow";
    const REQUIRED: &'static [&'static str] = &["unit"];
}

/// Direction of one flow edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConnection {
    pub from: String,
    pub to: String,
}

/// One node of the flow graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowNode {
    pub status: Option<String>,
    pub current_power: Measurement,
    /// Battery charge in percent
    pub charge_level: Measurement,
    pub critical: Option<bool>,
}
