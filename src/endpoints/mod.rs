//! Endpoint facade
//!
//! Adds one method per vendor resource to [`Session`](crate::Session):
//!
//! | Method | Route | Result |
//! |--------|-------|--------|
//! | `list_sites`, `list_sites_with` | `sites/list` | stream of `Site` (offset paged) |
//! | `site_details` | `site/{id}/details` | `Site` |
//! | `data_period` | `site/{id}/dataPeriod` | `DataPeriod` |
//! | `overview` | `site/{id}/overview` | `Overview` |
//! | `env_benefits` | `site/{id}/envBenefits` | `EnvBenefits` |
//! | `site_energy` | `site/{id}/energy` | `TimeSeries` |
//! | `site_power` | `site/{id}/power` | `TimeSeries` |
//! | `time_frame_energy` | `site/{id}/timeFrameEnergy` | `TimeFrameEnergy` |
//! | `energy_details` | `site/{id}/energyDetails` | `MeterDetails` |
//! | `power_details` | `site/{id}/powerDetails` | `MeterDetails` |
//! | `current_power_flow` | `site/{id}/currentPowerFlow` | `PowerFlow` |
//! | `storage_data` | `site/{id}/storageData` | `StorageData` |
//! | `list_inverters` | `site/{id}/inventory` | stream of `Inverter` |
//! | `list_components` | `equipment/{id}/list` | stream of `Component` |
//! | `get_power_data` | `equipment/{id}/{serial}/data` | stream of `TelemetryPoint` (windowed) |
//! | `current_version` | `version/current` | `Version` |
//! | `supported_versions` | `version/supported` | stream of `Version` |

mod catalog;
mod facade;
mod params;

pub use params::{DateRange, SiteQuery, SiteStatus, SortOrder, SortProperty, SystemUnits, TimeRange};

#[cfg(test)]
mod tests;
