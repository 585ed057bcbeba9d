//! Tests for the endpoint facade

use super::*;
use crate::auth::Credential;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::http::testing::ScriptedTransport;
use crate::models::{Measurement, MeterType, TimeUnit};
use crate::session::Session;
use chrono::{NaiveDate, NaiveDateTime};
use futures::{StreamExt, TryStreamExt};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn at(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn day(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

fn session(script: &Arc<ScriptedTransport>, config: ClientConfig) -> Session {
    Session::open_with_transport(Credential::new("site-key").unwrap(), config, script.clone())
        .unwrap()
}

// ============================================================================
// Parameter Tests
// ============================================================================

#[test]
fn test_time_range_rejects_inverted() {
    let err = TimeRange::new(at("2024-03-02 00:00:00"), at("2024-03-01 00:00:00")).unwrap_err();
    assert!(matches!(err, Error::InvalidRequest { .. }));

    let range = TimeRange::new(at("2024-03-01 00:00:00"), at("2024-03-01 00:00:00")).unwrap();
    assert_eq!(range.span(), chrono::Duration::zero());
}

#[test]
fn test_date_range_span_limit() {
    let range = DateRange::new(day("2024-01-01"), day("2024-03-01")).unwrap();
    let err = range
        .limit_span(chrono::Duration::days(31), "energy range")
        .unwrap_err();
    assert!(err.to_string().contains("energy range"));
}

#[test]
fn test_site_query_params() {
    let query = SiteQuery::new()
        .search("Lyon")
        .sort_by(SortProperty::PeakPower, SortOrder::Descending)
        .status(SiteStatus::Active)
        .status(SiteStatus::Pending)
        .status(SiteStatus::Active);

    let params = query.to_params();
    assert_eq!(params["searchText"], "Lyon");
    assert_eq!(params["sortProperty"], "PeakPower");
    assert_eq!(params["sortOrder"], "DESC");
    assert_eq!(params["status"], "Active,Pending");
    assert!(SiteQuery::default().to_params().is_empty());
}

#[test]
fn test_parse_units_and_status() {
    assert_eq!("metric".parse::<SystemUnits>().unwrap(), SystemUnits::Metrics);
    assert_eq!("Imperial".parse::<SystemUnits>().unwrap(), SystemUnits::Imperial);
    assert!("kelvin".parse::<SystemUnits>().is_err());
    assert_eq!("disabled".parse::<SiteStatus>().unwrap(), SiteStatus::Disabled);
    assert_eq!("quarter-of-an-hour".parse::<TimeUnit>().unwrap(), TimeUnit::QuarterOfAnHour);
    assert_eq!("feed-in".parse::<MeterType>().unwrap(), MeterType::FeedIn);
    assert_eq!("SelfConsumption".parse::<MeterType>().unwrap(), MeterType::SelfConsumption);
    assert!("export".parse::<MeterType>().is_err());
}

// ============================================================================
// List Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_list_sites_pages_through_all() {
    let script = Arc::new(
        ScriptedTransport::new()
            .json(200, json!({"sites": {"count": 3, "site": [
                {"id": 1, "name": "A"}, {"id": 2, "name": "B"}
            ]}}))
            .json(200, json!({"sites": {"count": 3, "site": [{"id": 3, "name": "C"}]}})),
    );
    let session = session(&script, ClientConfig::builder().page_size(2).build());

    let sites: Vec<_> = session.list_sites().try_collect().await.unwrap();

    let names: Vec<&str> = sites.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    let requests = script.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "sites/list");
    assert_eq!(requests[1].query["startIndex"], "2");
    assert_eq!(requests[1].query["size"], "2");
    assert_eq!(requests[1].query["api_key"], "site-key");
}

#[tokio::test]
async fn test_list_sites_with_filters_and_custom_paging() {
    let script = Arc::new(
        ScriptedTransport::new().json(200, json!({"sites": {"count": 0, "site": []}})),
    );
    let config = ClientConfig::builder().paging("offset", "limit").build();
    let session = session(&script, config);

    let query = SiteQuery::new().search("barn").status(SiteStatus::All);
    let sites: Vec<_> = session.list_sites_with(&query).try_collect().await.unwrap();

    assert!(sites.is_empty());
    let sent = &script.requests()[0];
    assert_eq!(sent.query["searchText"], "barn");
    assert_eq!(sent.query["status"], "All");
    assert_eq!(sent.query["offset"], "0");
    assert_eq!(sent.query["limit"], "100");
}

#[tokio::test]
async fn test_list_inverters() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"Inventory": {"meters": [], "inverters": [
            {"SN": "7F1-8B", "name": "Inverter 1", "model": "SE5000"}
        ]}}),
    ));
    let session = session(&script, ClientConfig::default());

    let inverters: Vec<_> = session.list_inverters(42).try_collect().await.unwrap();

    assert_eq!(inverters.len(), 1);
    assert_eq!(inverters[0].serial_number, "7F1-8B");
    assert_eq!(script.requests()[0].path, "site/42/inventory");
}

#[tokio::test]
async fn test_list_components() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"reporters": {"count": 1, "list": [
            {"name": "Inverter 1", "serialNumber": "7F1-8B", "kWpDC": 6.2}
        ]}}),
    ));
    let session = session(&script, ClientConfig::default());

    let components: Vec<_> = session.list_components(42).try_collect().await.unwrap();

    assert_eq!(components[0].kwp_dc, Measurement::Value(6.2));
    assert_eq!(script.requests()[0].path, "equipment/42/list");
}

#[tokio::test]
async fn test_get_power_data_invalid_range_makes_no_call() {
    let script = Arc::new(ScriptedTransport::new());
    let session = session(&script, ClientConfig::default());

    let err = session
        .get_power_data(1, "7F1-8B", at("2024-03-02 00:00:00"), at("2024-03-01 00:00:00"))
        .err()
        .unwrap();

    assert!(matches!(err, Error::InvalidRequest { .. }));
    assert_eq!(script.calls(), 0);
}

#[tokio::test]
async fn test_get_power_data_rejects_bad_serial() {
    let script = Arc::new(ScriptedTransport::new());
    let session = session(&script, ClientConfig::default());

    for serial in ["", "7F1/8B", "a b"] {
        let result =
            session.get_power_data(1, serial, at("2024-03-01 00:00:00"), at("2024-03-01 12:00:00"));
        assert!(matches!(result, Err(Error::InvalidRequest { .. })), "serial {serial:?}");
    }
    assert_eq!(script.calls(), 0);
}

#[tokio::test]
async fn test_get_power_data_valid_range_calls_once_per_window() {
    let script = Arc::new(
        ScriptedTransport::new()
            .json(200, json!({"data": {"count": 2, "telemetries": [
                {"date": "2024-03-01 10:00:00", "totalActivePower": 1200.0},
                {"date": "2024-03-01 10:05:00", "totalActivePower": "NaN"}
            ]}}))
            .json(200, json!({"data": {"count": 0, "telemetries": []}})),
    );
    let session = session(&script, ClientConfig::default());

    let points: Vec<_> = session
        .get_power_data(7, "7F1-8B", at("2024-03-01 00:00:00"), at("2024-03-09 00:00:00"))
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(points.len(), 2);
    assert_eq!(points[1].total_active_power, Measurement::Unavailable);
    let requests = script.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "equipment/7/7F1-8B/data");
    assert_eq!(requests[0].query["startTime"], "2024-03-01 00:00:00");
    assert_eq!(requests[0].query["endTime"], "2024-03-07 23:59:59");
    assert_eq!(requests[1].query["startTime"], "2024-03-08 00:00:00");
    assert_eq!(requests[1].query["endTime"], "2024-03-09 00:00:00");
}

#[tokio::test]
async fn test_supported_versions() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"supported": [{"release": "0.0.0"}, {"release": "1.0.0"}]}),
    ));
    let session = session(&script, ClientConfig::default());

    let releases: Vec<String> = session
        .supported_versions()
        .map(|v| v.unwrap().release)
        .collect()
        .await;
    assert_eq!(releases, vec!["0.0.0", "1.0.0"]);
}

// ============================================================================
// Single Record Tests
// ============================================================================

#[tokio::test]
async fn test_site_details() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"details": {"id": 9, "name": "Barn", "status": "Active", "peakPower": 12.3}}),
    ));
    let session = session(&script, ClientConfig::default());

    let site = session.site_details(9).await.unwrap();

    assert_eq!(site.name, "Barn");
    assert_eq!(site.peak_power, Measurement::Value(12.3));
    assert_eq!(script.requests()[0].path, "site/9/details");
}

#[tokio::test]
async fn test_site_details_missing_id() {
    let script = Arc::new(
        ScriptedTransport::new().json(200, json!({"details": {"name": "Barn"}})),
    );
    let session = session(&script, ClientConfig::default());

    let err = session.site_details(9).await.unwrap_err();
    assert_eq!(err.field(), Some("id"));
}

#[tokio::test]
async fn test_env_benefits_units() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"envBenefits": {"gasEmissionSaved": {"units": "lb", "co2": 1.0}}}),
    ));
    let session = session(&script, ClientConfig::default());

    let benefits = session.env_benefits(3, SystemUnits::Imperial).await.unwrap();

    assert_eq!(benefits.gas_emission_saved.units.as_deref(), Some("lb"));
    assert_eq!(script.requests()[0].query["systemUnits"], "Imperial");
}

#[tokio::test]
async fn test_site_energy() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"energy": {"timeUnit": "DAY", "unit": "Wh", "values": [
            {"date": "2024-03-01 00:00:00", "value": 21500.0}
        ]}}),
    ));
    let session = session(&script, ClientConfig::default());

    let range = DateRange::new(day("2024-03-01"), day("2024-03-31")).unwrap();
    let series = session.site_energy(3, range, TimeUnit::Day).await.unwrap();

    assert_eq!(series.unit, "Wh");
    let sent = &script.requests()[0];
    assert_eq!(sent.path, "site/3/energy");
    assert_eq!(sent.query["startDate"], "2024-03-01");
    assert_eq!(sent.query["endDate"], "2024-03-31");
    assert_eq!(sent.query["timeUnit"], "DAY");
}

#[tokio::test]
async fn test_site_energy_span_checked_locally() {
    let script = Arc::new(ScriptedTransport::new());
    let session = session(&script, ClientConfig::default());

    let range = DateRange::new(day("2024-01-01"), day("2024-06-01")).unwrap();
    let err = session
        .site_energy(3, range, TimeUnit::QuarterOfAnHour)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest { .. }));

    let err = session
        .site_power(
            3,
            TimeRange::new(at("2024-01-01 00:00:00"), at("2024-03-01 00:00:00")).unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidRequest { .. }));
    assert_eq!(script.calls(), 0);
}

#[tokio::test]
async fn test_site_power() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"power": {"timeUnit": "QUARTER_OF_AN_HOUR", "unit": "W", "values": [
            {"date": "2024-03-01 11:00:00", "value": null}
        ]}}),
    ));
    let session = session(&script, ClientConfig::default());

    let range = TimeRange::new(at("2024-03-01 11:00:00"), at("2024-03-01 13:00:00")).unwrap();
    let series = session.site_power(3, range).await.unwrap();

    assert_eq!(series.values[0].value, Measurement::Unavailable);
    assert_eq!(script.requests()[0].query["startTime"], "2024-03-01 11:00:00");
}

#[tokio::test]
async fn test_overview_data_period_and_version() {
    let script = Arc::new(
        ScriptedTransport::new()
            .json(200, json!({"overview": {
                "lastUpdateTime": "2024-03-01 12:00:00",
                "lifeTimeData": {"energy": 761985.75},
                "currentPower": {"power": 0.0}
            }}))
            .json(200, json!({"dataPeriod": {"startDate": "2013-05-05", "endDate": "2024-03-01"}}))
            .json(200, json!({"version": {"release": "1.0.0"}})),
    );
    let session = session(&script, ClientConfig::default());

    let overview = session.overview(5).await.unwrap();
    assert_eq!(overview.life_time_data.energy, Measurement::Value(761985.75));
    assert_eq!(overview.current_power.power, Measurement::Value(0.0));

    let period = session.data_period(5).await.unwrap();
    assert_eq!(period.start_date, Some(day("2013-05-05")));

    assert_eq!(session.current_version().await.unwrap().release, "1.0.0");

    let paths: Vec<String> = script.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, vec!["site/5/overview", "site/5/dataPeriod", "version/current"]);
}

#[tokio::test]
async fn test_time_frame_energy() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"timeFrameEnergy": {
            "energy": 761985.8,
            "unit": "Wh",
            "measuredBy": "INVERTER",
            "startLifetimeEnergy": {"date": "2024-01-01", "unit": "Wh", "energy": 1000.0},
            "endLifetimeEnergy": {"date": "2024-01-31", "unit": "Wh", "energy": "NaN"}
        }}),
    ));
    let session = session(&script, ClientConfig::default());

    let range = DateRange::new(day("2024-01-01"), day("2024-01-31")).unwrap();
    let energy = session.time_frame_energy(4, range).await.unwrap();

    assert_eq!(energy.energy, Measurement::Value(761985.8));
    let start = energy.start_lifetime_energy.unwrap();
    assert_eq!(start.date, Some(day("2024-01-01")));
    assert_eq!(
        energy.end_lifetime_energy.unwrap().energy,
        Measurement::Unavailable
    );

    let sent = &script.requests()[0];
    assert_eq!(sent.path, "site/4/timeFrameEnergy");
    assert_eq!(sent.query["startDate"], "2024-01-01");
    assert_eq!(sent.query["endDate"], "2024-01-31");
}

#[tokio::test]
async fn test_energy_details_meters() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"energyDetails": {"timeUnit": "HOUR", "unit": "Wh", "meters": [
            {"type": "Production", "values": [
                {"date": "2024-03-01 10:00:00", "value": 1250.0},
                {"date": "2024-03-01 11:00:00"}
            ]},
            {"type": "FeedIn", "values": []},
            {"type": "Export", "values": []}
        ]}}),
    ));
    let session = session(&script, ClientConfig::default());

    let range = TimeRange::new(at("2024-03-01 00:00:00"), at("2024-03-01 23:59:59")).unwrap();
    let details = session
        .energy_details(4, range, TimeUnit::Hour, &[MeterType::Production, MeterType::FeedIn])
        .await
        .unwrap();

    let production = details.meter(MeterType::Production).unwrap();
    assert_eq!(production.values[1].value, Measurement::Unavailable);
    assert_eq!(details.meters[2].meter_type, MeterType::Unknown);

    let sent = &script.requests()[0];
    assert_eq!(sent.path, "site/4/energyDetails");
    assert_eq!(sent.query["startTime"], "2024-03-01 00:00:00");
    assert_eq!(sent.query["timeUnit"], "HOUR");
    assert_eq!(sent.query["meters"], "Production,FeedIn");
}

#[tokio::test]
async fn test_power_details_all_meters() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"powerDetails": {"timeUnit": "QUARTER_OF_AN_HOUR", "unit": "W", "meters": [
            {"type": "Consumption", "values": [{"date": "2024-03-01 10:15:00", "value": 830.5}]}
        ]}}),
    ));
    let session = session(&script, ClientConfig::default());

    let range = TimeRange::new(at("2024-03-01 10:00:00"), at("2024-03-01 11:00:00")).unwrap();
    let details = session.power_details(4, range, &[]).await.unwrap();

    assert_eq!(details.time_unit, Some(TimeUnit::QuarterOfAnHour));
    assert_eq!(
        details.meter(MeterType::Consumption).unwrap().values[0].value,
        Measurement::Value(830.5)
    );
    let sent = &script.requests()[0];
    assert_eq!(sent.path, "site/4/powerDetails");
    assert!(!sent.query.contains_key("meters"));
}

#[tokio::test]
async fn test_current_power_flow() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"siteCurrentPowerFlow": {
            "updateRefreshRate": 3,
            "unit": "kW",
            "connections": [{"from": "GRID", "to": "Load"}],
            "GRID": {"status": "Active", "currentPower": 3.4},
            "LOAD": {"status": "Active", "currentPower": 3.4},
            "PV": {"status": "Idle", "currentPower": 0}
        }}),
    ));
    let session = session(&script, ClientConfig::default());

    let flow = session.current_power_flow(4).await.unwrap();

    assert_eq!(flow.unit, "kW");
    assert_eq!(flow.connections[0].from, "GRID");
    assert_eq!(flow.grid.unwrap().current_power, Measurement::Value(3.4));
    assert_eq!(flow.pv.unwrap().charge_level, Measurement::Unavailable);
    assert!(flow.storage.is_none());
    assert_eq!(script.requests()[0].path, "site/4/currentPowerFlow");
}

#[tokio::test]
async fn test_storage_data() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"storageData": {"batteryCount": 1, "batteries": [{
            "nameplate": 9800,
            "serialNumber": "BAT-01",
            "modelNumber": "LG RESU 10H",
            "telemetryCount": 1,
            "telemetries": [{
                "timeStamp": "2024-03-01 12:00:00",
                "power": -420.0,
                "batteryState": 4,
                "lifeTimeEnergyCharged": 1200000,
                "lifeTimeEnergyDischarged": 1100000,
                "fullPackEnergyAvailable": 9600,
                "internalTemp": 24.5,
                "ACGridCharging": 0,
                "stateOfCharge": ""
            }]
        }]}}),
    ));
    let session = session(&script, ClientConfig::default());

    let range = TimeRange::new(at("2024-03-01 00:00:00"), at("2024-03-03 00:00:00")).unwrap();
    let storage = session
        .storage_data(4, range, &["BAT-01", "BAT-02"])
        .await
        .unwrap();

    assert_eq!(storage.battery_count, 1);
    let battery = &storage.batteries[0];
    assert_eq!(battery.serial_number, "BAT-01");
    assert_eq!(battery.telemetries[0].power, Measurement::Value(-420.0));
    assert_eq!(battery.telemetries[0].state_of_charge, Measurement::Unavailable);

    let sent = &script.requests()[0];
    assert_eq!(sent.path, "site/4/storageData");
    assert_eq!(sent.query["serials"], "BAT-01,BAT-02");
    assert_eq!(sent.query["endTime"], "2024-03-03 00:00:00");
}

#[tokio::test]
async fn test_detail_endpoints_check_ranges_locally() {
    let script = Arc::new(ScriptedTransport::new());
    let session = session(&script, ClientConfig::default());
    let two_months =
        TimeRange::new(at("2024-01-01 00:00:00"), at("2024-03-01 00:00:00")).unwrap();
    let eight_days =
        TimeRange::new(at("2024-03-01 00:00:00"), at("2024-03-09 00:00:00")).unwrap();
    let one_day = TimeRange::new(at("2024-03-01 00:00:00"), at("2024-03-02 00:00:00")).unwrap();

    let results = [
        session
            .energy_details(4, two_months, TimeUnit::Hour, &[])
            .await
            .map(|_| ()),
        session.power_details(4, two_months, &[]).await.map(|_| ()),
        session.storage_data(4, eight_days, &[]).await.map(|_| ()),
        session.storage_data(4, one_day, &["BAT 01"]).await.map(|_| ()),
    ];

    for result in results {
        assert!(matches!(result, Err(Error::InvalidRequest { .. })), "{result:?}");
    }
    assert_eq!(script.calls(), 0);
}

#[tokio::test]
async fn test_energy_details_coarse_unit_has_no_span_limit() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"energyDetails": {"timeUnit": "MONTH", "unit": "Wh", "meters": []}}),
    ));
    let session = session(&script, ClientConfig::default());

    let range = TimeRange::new(at("2020-01-01 00:00:00"), at("2024-01-01 00:00:00")).unwrap();
    let details = session
        .energy_details(4, range, TimeUnit::Month, &[])
        .await
        .unwrap();
    assert!(details.meters.is_empty());
}

// ============================================================================
// Session Tests
// ============================================================================

#[test]
fn test_session_rejects_invalid_config() {
    let script = Arc::new(ScriptedTransport::new());
    let result = Session::open_with_transport(
        Credential::new("k").unwrap(),
        ClientConfig::builder().page_size(0).build(),
        script,
    );
    assert!(matches!(result, Err(Error::Config { .. })));
}

#[tokio::test]
async fn test_session_rate_state_follows_calls() {
    let script = Arc::new(ScriptedTransport::new().reply(Ok(crate::http::RawResponse::json(
        200,
        &json!({"version": {"release": "1.0.0"}}),
    )
    .with_header("x-ratelimit-remaining", "299"))));
    let session = session(&script, ClientConfig::default());

    assert_eq!(session.rate_state().remaining, None);
    session.current_version().await.unwrap();
    assert_eq!(session.rate_state().remaining, Some(299));
    session.close();
}
