//! Typed records
//!
//! One schema per record the service returns. Each record type implements
//! [`Record`](crate::decode::Record), naming the fields that must be present.
//! Numeric readings use [`Measurement`] so unavailable values stay distinct
//! from zero.

mod energy;
mod flow;
mod inventory;
mod measurement;
mod site;
mod storage;
mod telemetry;
pub mod timestamp;

pub use energy::{
    CurrentPower, EnergySummary, EnvBenefits, GasEmissionSaved, LifetimeEnergy, MeterDetails,
    MeterSeries, MeterType, Overview, SeriesValue, TimeFrameEnergy, TimeSeries, TimeUnit,
};
pub use flow::{FlowConnection, FlowNode, PowerFlow};
pub use inventory::{Component, Inverter};
pub use measurement::Measurement;
pub use site::{DataPeriod, PrimaryModule, PublicSettings, Site, SiteLocation, Version};
pub use storage::{BatteryTelemetry, StorageBattery, StorageData};
pub use telemetry::{InverterMode, PhaseData, TelemetryPoint};
