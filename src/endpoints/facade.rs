//! One method per vendor resource
//!
//! Each operation checks its arguments, builds a request and hands it to
//! the dispatcher. List-shaped resources come back as lazy record streams;
//! arguments of those are checked when the method is called, not when the
//! stream is first polled.

use super::catalog;
use super::params::{DateRange, SiteQuery, SystemUnits, TimeRange};
use crate::decode::{decode_one, Record, RecordShape};
use crate::error::{Error, Result};
use crate::http::RequestSpec;
use crate::models::{
    timestamp, Component, DataPeriod, EnvBenefits, Inverter, MeterDetails, MeterType, Overview,
    PowerFlow, Site, StorageData, TelemetryPoint, TimeFrameEnergy, TimeSeries, TimeUnit, Version,
};
use crate::pagination::{NoPaginator, OffsetPaginator, Pager, RecordStream, WindowPaginator};
use crate::session::Session;
use chrono::{Duration, NaiveDateTime};
use tracing::debug;

/// Longest range the power and power details endpoints accept
const MAX_POWER_SPAN_DAYS: i64 = 31;

/// Longest range the storage endpoint accepts
const MAX_STORAGE_SPAN_DAYS: i64 = 7;

impl Session {
    // ========================================================================
    // Lists
    // ========================================================================

    /// All sites visible to the API key
    pub fn list_sites(&self) -> RecordStream<'_, Site> {
        self.list_sites_with(&SiteQuery::default())
    }

    /// Sites matching a search, in the requested order
    pub fn list_sites_with(&self, query: &SiteQuery) -> RecordStream<'_, Site> {
        let request = RequestSpec::get(catalog::SITES).with_query(query.to_params());
        let paging = &self.config().paging;
        let paginator = OffsetPaginator::new(
            &paging.offset_param,
            &paging.limit_param,
            self.config().page_size,
        );
        Pager::new(paginator, catalog::SITES_SHAPE).into_stream(self.dispatcher(), request)
    }

    /// Inverters installed at a site
    pub fn list_inverters(&self, site_id: u64) -> RecordStream<'_, Inverter> {
        self.single_page(catalog::inventory(site_id), catalog::INVENTORY_SHAPE)
    }

    /// Inverters and other reporting equipment at a site
    pub fn list_components(&self, site_id: u64) -> RecordStream<'_, Component> {
        self.single_page(catalog::components(site_id), catalog::COMPONENTS_SHAPE)
    }

    /// API versions the service still accepts
    pub fn supported_versions(&self) -> RecordStream<'_, Version> {
        self.single_page(catalog::SUPPORTED_VERSIONS, catalog::SUPPORTED_VERSIONS_SHAPE)
    }

    /// Inverter telemetry between `start` and `end`, inclusive
    ///
    /// The range is fetched in windows of at most `paging.max_window_days`,
    /// one request per window, oldest first. Fails with `InvalidRequest`
    /// before any request when `start` is after `end` or the serial number
    /// cannot go into a path.
    pub fn get_power_data(
        &self,
        site_id: u64,
        serial_number: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<RecordStream<'_, TelemetryPoint>> {
        let range = TimeRange::new(start, end)?;
        check_serial(serial_number)?;

        let max_window = Duration::days(i64::from(self.config().paging.max_window_days));
        let paginator = WindowPaginator::new(
            range.start(),
            range.end(),
            max_window,
            catalog::START_TIME,
            catalog::END_TIME,
        );
        debug!(
            "Telemetry for {serial_number} at site {site_id} in {} windows",
            paginator.windows().len()
        );

        let request = RequestSpec::get(catalog::telemetry(site_id, serial_number));
        Ok(Pager::new(paginator, catalog::TELEMETRY_SHAPE).into_stream(self.dispatcher(), request))
    }

    // ========================================================================
    // Single Records
    // ========================================================================

    /// Full details of one site
    pub async fn site_details(&self, site_id: u64) -> Result<Site> {
        let request = RequestSpec::get(catalog::site_details(site_id));
        self.fetch_one(&request, catalog::SITE_DETAILS_RECORD).await
    }

    /// First and last day with production data
    pub async fn data_period(&self, site_id: u64) -> Result<DataPeriod> {
        let request = RequestSpec::get(catalog::data_period(site_id));
        self.fetch_one(&request, catalog::DATA_PERIOD_RECORD).await
    }

    /// Lifetime, yearly, monthly and daily totals plus current power
    pub async fn overview(&self, site_id: u64) -> Result<Overview> {
        let request = RequestSpec::get(catalog::overview(site_id));
        self.fetch_one(&request, catalog::OVERVIEW_RECORD).await
    }

    /// Emissions saved and equivalents
    pub async fn env_benefits(&self, site_id: u64, units: SystemUnits) -> Result<EnvBenefits> {
        let request =
            RequestSpec::get(catalog::env_benefits(site_id)).query("systemUnits", units.as_str());
        self.fetch_one(&request, catalog::ENV_BENEFITS_RECORD).await
    }

    /// Energy produced per `time_unit` over a date range
    ///
    /// Quarter-hour and hourly series are limited to a month, daily series
    /// to a year.
    pub async fn site_energy(
        &self,
        site_id: u64,
        range: DateRange,
        time_unit: TimeUnit,
    ) -> Result<TimeSeries> {
        let range = match time_unit.max_span() {
            Some(max) => range.limit_span(max, &format!("{} energy range", time_unit.as_str()))?,
            None => range,
        };

        let request = RequestSpec::get(catalog::energy(site_id))
            .query("startDate", range.start().format(timestamp::DATE_FORMAT).to_string())
            .query("endDate", range.end().format(timestamp::DATE_FORMAT).to_string())
            .query("timeUnit", time_unit.as_str());
        self.fetch_one(&request, catalog::ENERGY_RECORD).await
    }

    /// Quarter-hour site power over a range of at most a month
    pub async fn site_power(&self, site_id: u64, range: TimeRange) -> Result<TimeSeries> {
        let range = range.limit_span(Duration::days(MAX_POWER_SPAN_DAYS), "power range")?;

        let request = RequestSpec::get(catalog::power(site_id))
            .query(catalog::START_TIME, timestamp::format(&range.start()))
            .query(catalog::END_TIME, timestamp::format(&range.end()));
        self.fetch_one(&request, catalog::POWER_RECORD).await
    }

    /// Energy produced between two dates, with lifetime readings at both ends
    pub async fn time_frame_energy(
        &self,
        site_id: u64,
        range: DateRange,
    ) -> Result<TimeFrameEnergy> {
        let request = RequestSpec::get(catalog::time_frame_energy(site_id))
            .query("startDate", range.start().format(timestamp::DATE_FORMAT).to_string())
            .query("endDate", range.end().format(timestamp::DATE_FORMAT).to_string());
        self.fetch_one(&request, catalog::TIME_FRAME_ENERGY_RECORD).await
    }

    /// Energy per meter and `time_unit`
    ///
    /// An empty `meters` slice asks for every meter the site has. Span
    /// limits are the same as for [`site_energy`](Self::site_energy).
    pub async fn energy_details(
        &self,
        site_id: u64,
        range: TimeRange,
        time_unit: TimeUnit,
        meters: &[MeterType],
    ) -> Result<MeterDetails> {
        let range = match time_unit.max_span() {
            Some(max) => {
                range.limit_span(max, &format!("{} energy details range", time_unit.as_str()))?
            }
            None => range,
        };

        let request = RequestSpec::get(catalog::energy_details(site_id))
            .query(catalog::START_TIME, timestamp::format(&range.start()))
            .query(catalog::END_TIME, timestamp::format(&range.end()))
            .query("timeUnit", time_unit.as_str())
            .query_opt("meters", join_meters(meters));
        self.fetch_one(&request, catalog::ENERGY_DETAILS_RECORD).await
    }

    /// Quarter-hour power per meter over a range of at most a month
    pub async fn power_details(
        &self,
        site_id: u64,
        range: TimeRange,
        meters: &[MeterType],
    ) -> Result<MeterDetails> {
        let range =
            range.limit_span(Duration::days(MAX_POWER_SPAN_DAYS), "power details range")?;

        let request = RequestSpec::get(catalog::power_details(site_id))
            .query(catalog::START_TIME, timestamp::format(&range.start()))
            .query(catalog::END_TIME, timestamp::format(&range.end()))
            .query_opt("meters", join_meters(meters));
        self.fetch_one(&request, catalog::POWER_DETAILS_RECORD).await
    }

    /// Live power flow between grid, load, panels and storage
    pub async fn current_power_flow(&self, site_id: u64) -> Result<PowerFlow> {
        let request = RequestSpec::get(catalog::power_flow(site_id));
        self.fetch_one(&request, catalog::POWER_FLOW_RECORD).await
    }

    /// Battery telemetry over a range of at most a week
    ///
    /// An empty `serials` slice asks for every battery at the site.
    pub async fn storage_data(
        &self,
        site_id: u64,
        range: TimeRange,
        serials: &[&str],
    ) -> Result<StorageData> {
        let range = range.limit_span(Duration::days(MAX_STORAGE_SPAN_DAYS), "storage range")?;
        for serial in serials {
            check_serial(serial)?;
        }

        let serials = (!serials.is_empty()).then(|| serials.join(","));
        let request = RequestSpec::get(catalog::storage(site_id))
            .query(catalog::START_TIME, timestamp::format(&range.start()))
            .query(catalog::END_TIME, timestamp::format(&range.end()))
            .query_opt("serials", serials);
        self.fetch_one(&request, catalog::STORAGE_RECORD).await
    }

    /// API version the service currently runs
    pub async fn current_version(&self) -> Result<Version> {
        let request = RequestSpec::get(catalog::CURRENT_VERSION);
        self.fetch_one(&request, catalog::CURRENT_VERSION_RECORD).await
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn single_page<T: Record>(
        &self,
        path: impl Into<String>,
        shape: RecordShape,
    ) -> RecordStream<'_, T> {
        Pager::new(NoPaginator, shape).into_stream(self.dispatcher(), RequestSpec::get(path))
    }

    async fn fetch_one<T: Record>(&self, request: &RequestSpec, record_path: &str) -> Result<T> {
        let body = self.dispatcher().execute(request).await?;
        decode_one(&body, record_path)
    }
}

fn join_meters(meters: &[MeterType]) -> Option<String> {
    if meters.is_empty() {
        return None;
    }
    let names: Vec<&str> = meters.iter().map(|m| m.as_str()).collect();
    Some(names.join(","))
}

fn check_serial(serial_number: &str) -> Result<()> {
    if serial_number.is_empty() {
        return Err(Error::invalid_request("serial number is empty"));
    }
    if serial_number
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%'))
    {
        return Err(Error::invalid_request(format!(
            "serial number '{serial_number}' contains characters not allowed in a request"
        )));
    }
    Ok(())
}
