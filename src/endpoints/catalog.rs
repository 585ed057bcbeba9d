//! Vendor routes and where their records live

use crate::decode::RecordShape;

pub const SITES: &str = "sites/list";
pub const SITES_SHAPE: RecordShape = RecordShape::counted("sites.site", "sites.count");

pub const INVENTORY_SHAPE: RecordShape = RecordShape::at("Inventory.inverters");
pub const COMPONENTS_SHAPE: RecordShape = RecordShape::counted("reporters.list", "reporters.count");
pub const TELEMETRY_SHAPE: RecordShape = RecordShape::counted("data.telemetries", "data.count");

pub const SITE_DETAILS_RECORD: &str = "details";
pub const DATA_PERIOD_RECORD: &str = "dataPeriod";
pub const OVERVIEW_RECORD: &str = "overview";
pub const ENV_BENEFITS_RECORD: &str = "envBenefits";
pub const ENERGY_RECORD: &str = "energy";
pub const POWER_RECORD: &str = "power";
pub const TIME_FRAME_ENERGY_RECORD: &str = "timeFrameEnergy";
pub const ENERGY_DETAILS_RECORD: &str = "energyDetails";
pub const POWER_DETAILS_RECORD: &str = "powerDetails";
pub const POWER_FLOW_RECORD: &str = "siteCurrentPowerFlow";
pub const STORAGE_RECORD: &str = "storageData";

pub const CURRENT_VERSION: &str = "version/current";
pub const CURRENT_VERSION_RECORD: &str = "version";
pub const SUPPORTED_VERSIONS: &str = "version/supported";
pub const SUPPORTED_VERSIONS_SHAPE: RecordShape = RecordShape::at("supported");

/// Telemetry window parameters
pub const START_TIME: &str = "startTime";
pub const END_TIME: &str = "endTime";

pub fn site_details(site_id: u64) -> String {
    format!("site/{site_id}/details")
}

pub fn data_period(site_id: u64) -> String {
    format!("site/{site_id}/dataPeriod")
}

pub fn overview(site_id: u64) -> String {
    format!("site/{site_id}/overview")
}

pub fn env_benefits(site_id: u64) -> String {
    format!("site/{site_id}/envBenefits")
}

pub fn energy(site_id: u64) -> String {
    format!("site/{site_id}/energy")
}

pub fn power(site_id: u64) -> String {
    format!("site/{site_id}/power")
}

pub fn time_frame_energy(site_id: u64) -> String {
    format!("site/{site_id}/timeFrameEnergy")
}

pub fn energy_details(site_id: u64) -> String {
    format!("site/{site_id}/energyDetails")
}

pub fn power_details(site_id: u64) -> String {
    format!("site/{site_id}/powerDetails")
}

pub fn power_flow(site_id: u64) -> String {
    format!("site/{site_id}/currentPowerFlow")
}

pub fn storage(site_id: u64) -> String {
    format!("site/{site_id}/storageData")
}

pub fn inventory(site_id: u64) -> String {
    format!("site/{site_id}/inventory")
}

pub fn components(site_id: u64) -> String {
    format!("equipment/{site_id}/list")
}

pub fn telemetry(site_id: u64, serial: &str) -> String {
    format!("equipment/{site_id}/{serial}/data")
}
