//! Inverter telemetry records

use super::measurement::Measurement;
use super::timestamp;
use crate::decode::Record;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One inverter telemetry sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryPoint {
    #[serde(with = "timestamp")]
    pub date: NaiveDateTime,
    /// Total active power in W
    #[serde(default)]
    pub total_active_power: Measurement,
    #[serde(default)]
    pub power_limit: Measurement,
    /// Lifetime energy in Wh
    #[serde(default)]
    pub total_energy: Measurement,
    /// Temperature in °C
    #[serde(default)]
    pub temperature: Measurement,
    #[serde(default)]
    pub dc_voltage: Measurement,
    #[serde(default)]
    pub ground_fault_resistance: Measurement,
    #[serde(default)]
    pub inverter_mode: Option<InverterMode>,
    #[serde(default)]
    pub operation_mode: Option<u8>,
    #[serde(default, rename = "vL1To2")]
    pub v_l1_to2: Measurement,
    #[serde(default, rename = "vL2To3")]
    pub v_l2_to3: Measurement,
    #[serde(default, rename = "vL3To1")]
    pub v_l3_to1: Measurement,
    #[serde(default, rename = "L1Data")]
    pub l1_data: Option<PhaseData>,
    #[serde(default, rename = "L2Data")]
    pub l2_data: Option<PhaseData>,
    #[serde(default, rename = "L3Data")]
    pub l3_data: Option<PhaseData>,
}

impl Record for TelemetryPoint {
    const KIND: &'static str = "telemetry";
    const REQUIRED: &'static [&'static str] = &["date"];
}

/// Per-phase AC measurements
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhaseData {
    pub ac_current: Measurement,
    pub ac_voltage: Measurement,
    pub ac_frequency: Measurement,
    pub apparent_power: Measurement,
    pub active_power: Measurement,
    pub reactive_power: Measurement,
    pub cos_phi: Measurement,
}

/// Operating mode reported by an inverter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InverterMode {
    Off,
    Sleeping,
    Starting,
    Mppt,
    Throttled,
    ShuttingDown,
    Fault,
    Standby,
    LockedStdby,
    LockedFireFighters,
    LockedForceShutdown,
    LockedCommTimeout,
    LockedInvTrip,
    LockedInvArcDetected,
    LockedDg,
    LockedPhaseBalancer,
    LockedPreCommissioning,
    LockedInternal,
    /// A mode this client does not know yet
    #[serde(other)]
    Unknown,
}

impl InverterMode {
    /// Human-readable description
    pub fn description(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Sleeping => "Night mode",
            Self::Starting => "Pre-production",
            Self::Mppt => "Production",
            Self::Throttled => "Forced power reduction",
            Self::ShuttingDown => "Shutdown procedure",
            Self::Fault => "Error mode",
            Self::Standby => "Maintenance mode",
            Self::LockedStdby => "Standby mode lock",
            Self::LockedFireFighters => "Firefighters lock mode",
            Self::LockedForceShutdown => "Forced shutdown from server",
            Self::LockedCommTimeout => "Communication timeout",
            Self::LockedInvTrip => "Inverter self-lock trip",
            Self::LockedInvArcDetected => "Inverter self-lock on arc detection",
            Self::LockedDg => "Inverter lock due to DG mode enable",
            Self::LockedPhaseBalancer => "Inverter lock due to phase imbalance",
            Self::LockedPreCommissioning => "Inverter lock due to pre-commissioning",
            Self::LockedInternal => "Inverter lock due to an undisclosed internal reason",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether the inverter is producing power
    pub fn is_producing(self) -> bool {
        matches!(self, Self::Mppt | Self::Throttled)
    }
}
