//! Tests for pagination module

use super::*;
use crate::auth::{Authenticator, Credential};
use crate::config::ClientConfig;
use crate::decode::RecordShape;
use crate::error::Error;
use crate::http::testing::ScriptedTransport;
use crate::http::{Dispatcher, RequestSpec};
use crate::models::{Inverter, Site};
use crate::types::StringMap;
use chrono::{Duration, NaiveDateTime};
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

const SITES: RecordShape = RecordShape::counted("sites.site", "sites.count");

fn at(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn dispatcher(script: &Arc<ScriptedTransport>) -> Dispatcher {
    let config = ClientConfig::default();
    let auth = Authenticator::new(Credential::new("key").unwrap(), config.auth.clone());
    Dispatcher::new(script.clone(), auth, &config)
}

fn sites_page(ids: std::ops::Range<u64>, count: Option<u64>) -> Value {
    let sites: Vec<Value> = ids
        .map(|id| json!({"id": id, "name": format!("Site {id}")}))
        .collect();
    match count {
        Some(count) => json!({"sites": {"count": count, "site": sites}}),
        None => json!({"sites": {"site": sites}}),
    }
}

fn offset_pager(size: u32) -> Pager {
    Pager::new(OffsetPaginator::new("startIndex", "size", size), SITES)
}

async fn collect_ids(pager: Pager, dispatcher: &Dispatcher) -> Vec<u64> {
    pager
        .into_stream::<Site>(dispatcher, RequestSpec::get("sites/list"))
        .map(|site| site.unwrap().id)
        .collect()
        .await
}

// ============================================================================
// NextPage / State Tests
// ============================================================================

#[test]
fn test_next_page_with_param() {
    let next = NextPage::with_param("startIndex", "2");
    assert!(next.is_continue());
    assert!(!next.is_done());

    if let NextPage::Continue(params) = next {
        assert_eq!(params.get("startIndex"), Some(&"2".to_string()));
    } else {
        panic!("Expected Continue");
    }
}

#[test]
fn test_pagination_state_record_page_keeps_known_total() {
    let mut state = PaginationState::new();
    state.record_page(2, Some(5));
    state.record_page(2, None);
    assert_eq!(state.page, 2);
    assert_eq!(state.total_fetched, 4);
    assert_eq!(state.reported_total, Some(5));
}

// ============================================================================
// Strategy Tests
// ============================================================================

#[test]
fn test_no_paginator() {
    let paginator = NoPaginator;
    let mut state = PaginationState::new();
    assert!(paginator.initial_params(&state).is_empty());
    assert!(paginator.process_page(3, None, &mut state).is_done());
    assert!(state.done);
}

#[test]
fn test_offset_paginator_params() {
    let paginator = OffsetPaginator::new("startIndex", "size", 100);
    let params = paginator.initial_params(&PaginationState::new());

    let mut expected = StringMap::new();
    expected.insert("startIndex".to_string(), "0".to_string());
    expected.insert("size".to_string(), "100".to_string());
    assert_eq!(params, expected);
}

#[test]
fn test_offset_paginator_offsets_increase() {
    let paginator = OffsetPaginator::new("offset", "limit", 2);
    let mut state = PaginationState::new();

    let mut offsets = vec![state.offset];
    while let NextPage::Continue(params) = paginator.process_page(2, None, &mut state) {
        assert_eq!(params.get("offset"), Some(&state.offset.to_string()));
        offsets.push(state.offset);
        if offsets.len() == 4 {
            break;
        }
    }
    assert_eq!(offsets, vec![0, 2, 4, 6]);
}

#[test]
fn test_offset_paginator_short_page_stops() {
    let paginator = OffsetPaginator::new("startIndex", "size", 2);
    let mut state = PaginationState::new();
    assert!(paginator.process_page(2, None, &mut state).is_continue());
    assert!(paginator.process_page(1, None, &mut state).is_done());
    assert!(state.done);
}

#[test]
fn test_offset_paginator_total_reached_stops() {
    let paginator = OffsetPaginator::new("startIndex", "size", 2);
    let mut state = PaginationState::new();
    assert!(paginator.process_page(2, Some(4), &mut state).is_continue());
    assert!(paginator.process_page(2, Some(4), &mut state).is_done());
}

#[test]
fn test_offset_paginator_ignores_exceeded_total() {
    let paginator = OffsetPaginator::new("startIndex", "size", 2);
    let mut state = PaginationState::new();
    assert!(paginator.process_page(2, Some(3), &mut state).is_continue());
    assert!(paginator.process_page(2, Some(3), &mut state).is_continue());
    assert!(paginator.process_page(1, Some(3), &mut state).is_done());
    assert_eq!(state.total_fetched, 5);
}

#[test]
fn test_split_windows() {
    let windows = split_windows(
        at("2024-03-01 00:00:00"),
        at("2024-03-20 12:00:00"),
        Duration::days(7),
    );

    assert_eq!(
        windows,
        vec![
            (at("2024-03-01 00:00:00"), at("2024-03-07 23:59:59")),
            (at("2024-03-08 00:00:00"), at("2024-03-14 23:59:59")),
            (at("2024-03-15 00:00:00"), at("2024-03-20 12:00:00")),
        ]
    );
}

#[test]
fn test_split_windows_short_range() {
    let start = at("2024-03-01 10:00:00");
    assert_eq!(
        split_windows(start, start, Duration::days(7)),
        vec![(start, start)]
    );
    assert!(split_windows(start, at("2024-02-01 00:00:00"), Duration::days(7)).is_empty());
}

#[test]
fn test_split_windows_near_datetime_limits() {
    let start = at("2024-03-01 00:00:00");
    assert_eq!(
        split_windows(start, start, Duration::days(200_000_000)),
        vec![(start, start)]
    );

    let max = NaiveDateTime::MAX;
    assert_eq!(split_windows(max, max, Duration::days(7)), vec![(max, max)]);

    let near_max = max - Duration::days(10);
    let windows = split_windows(near_max, max, Duration::days(7));
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[1].1, max);
}

#[test]
fn test_window_paginator_walks_windows() {
    let paginator = WindowPaginator::new(
        at("2024-03-01 00:00:00"),
        at("2024-03-10 00:00:00"),
        Duration::days(7),
        "startTime",
        "endTime",
    );
    let mut state = PaginationState::new();

    let first = paginator.initial_params(&state);
    assert_eq!(first.get("startTime"), Some(&"2024-03-01 00:00:00".to_string()));
    assert_eq!(first.get("endTime"), Some(&"2024-03-07 23:59:59".to_string()));

    let NextPage::Continue(second) = paginator.process_page(10, Some(10), &mut state) else {
        panic!("Expected a second window");
    };
    assert_eq!(second.get("startTime"), Some(&"2024-03-08 00:00:00".to_string()));
    assert_eq!(second.get("endTime"), Some(&"2024-03-10 00:00:00".to_string()));

    assert!(paginator.process_page(0, None, &mut state).is_done());
    assert_eq!(state.total_fetched, 10);
    assert_eq!(state.reported_total, None);
}

// ============================================================================
// Pager Tests
// ============================================================================

#[tokio::test]
async fn test_pager_three_pages() {
    let script = Arc::new(
        ScriptedTransport::new()
            .json(200, sites_page(1..3, None))
            .json(200, sites_page(3..5, None))
            .json(200, sites_page(5..6, None)),
    );
    let dispatcher = dispatcher(&script);

    let ids = collect_ids(offset_pager(2), &dispatcher).await;

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(script.calls(), 3);
    let offsets: Vec<String> = script
        .requests()
        .iter()
        .map(|r| r.query["startIndex"].clone())
        .collect();
    assert_eq!(offsets, vec!["0", "2", "4"]);
    assert!(script.requests().iter().all(|r| r.query["size"] == "2"));
}

#[tokio::test]
async fn test_pager_is_lazy() {
    let script = Arc::new(ScriptedTransport::new().json(200, sites_page(1..2, None)));
    let dispatcher = dispatcher(&script);

    let stream = offset_pager(2).into_stream::<Site>(&dispatcher, RequestSpec::get("sites/list"));
    assert_eq!(script.calls(), 0);
    drop(stream);
    assert_eq!(script.calls(), 0);
}

#[tokio::test]
async fn test_pager_stops_at_reported_total() {
    let script = Arc::new(
        ScriptedTransport::new()
            .json(200, sites_page(1..3, Some(4)))
            .json(200, sites_page(3..5, Some(4))),
    );
    let dispatcher = dispatcher(&script);

    let ids = collect_ids(offset_pager(2), &dispatcher).await;

    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(script.calls(), 2);
}

#[tokio::test]
async fn test_pager_trusts_records_over_total() {
    // The service claims 100 records but the second page is short
    let script = Arc::new(
        ScriptedTransport::new()
            .json(200, sites_page(1..3, Some(100)))
            .json(200, sites_page(3..4, Some(100))),
    );
    let dispatcher = dispatcher(&script);

    let ids = collect_ids(offset_pager(2), &dispatcher).await;

    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(script.calls(), 2);
}

#[tokio::test]
async fn test_pager_keeps_going_past_understated_total() {
    // The service claims 3 records but keeps returning full pages
    let script = Arc::new(
        ScriptedTransport::new()
            .json(200, sites_page(1..3, Some(3)))
            .json(200, sites_page(3..5, Some(3)))
            .json(200, sites_page(5..6, Some(3))),
    );
    let dispatcher = dispatcher(&script);

    let ids = collect_ids(offset_pager(2), &dispatcher).await;

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(script.calls(), 3);
}

#[tokio::test]
async fn test_pager_empty_result() {
    let script = Arc::new(ScriptedTransport::new().json(200, sites_page(0..0, Some(0))));
    let dispatcher = dispatcher(&script);

    let ids = collect_ids(offset_pager(2), &dispatcher).await;

    assert!(ids.is_empty());
    assert_eq!(script.calls(), 1);
}

#[tokio::test]
async fn test_pager_error_after_emitted_page() {
    let script = Arc::new(
        ScriptedTransport::new()
            .json(200, sites_page(1..3, None))
            .status(404)
            .json(200, sites_page(3..4, None)),
    );
    let dispatcher = dispatcher(&script);

    let results: Vec<_> = offset_pager(2)
        .into_stream::<Site>(&dispatcher, RequestSpec::get("sites/list"))
        .collect()
        .await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().id, 1);
    assert_eq!(results[1].as_ref().unwrap().id, 2);
    assert!(matches!(results[2], Err(Error::NotFound { .. })));
    assert_eq!(script.calls(), 2);
}

#[tokio::test]
async fn test_pager_malformed_page_emits_nothing_from_it() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"sites": {"site": [{"id": 1, "name": "Good"}, {"name": "No id"}]}}),
    ));
    let dispatcher = dispatcher(&script);

    let results: Vec<_> = offset_pager(2)
        .into_stream::<Site>(&dispatcher, RequestSpec::get("sites/list"))
        .collect()
        .await;

    assert_eq!(results.len(), 1);
    let err = results[0].as_ref().unwrap_err();
    assert_eq!(err.field(), Some("id"));
}

#[tokio::test]
async fn test_pager_single_page() {
    let script = Arc::new(ScriptedTransport::new().json(
        200,
        json!({"Inventory": {"inverters": [
            {"SN": "A1", "name": "Inverter 1"},
            {"SN": "B2", "name": "Inverter 2"}
        ]}}),
    ));
    let dispatcher = dispatcher(&script);

    let inverters: Vec<Inverter> = Pager::new(NoPaginator, RecordShape::at("Inventory.inverters"))
        .into_stream(&dispatcher, RequestSpec::get("site/1/inventory"))
        .map(|r| r.unwrap())
        .collect()
        .await;

    assert_eq!(inverters.len(), 2);
    assert_eq!(inverters[1].serial_number, "B2");
    assert_eq!(script.calls(), 1);
    assert!(!script.requests()[0].query.contains_key("startIndex"));
}

#[tokio::test]
async fn test_pager_windows_in_order() {
    let point = |date: &str| json!({"date": date, "totalActivePower": 10.0});
    let script = Arc::new(
        ScriptedTransport::new()
            .json(200, json!({"data": {"count": 1, "telemetries": [point("2024-03-02 10:00:00")]}}))
            .json(200, json!({"data": {"count": 1, "telemetries": [point("2024-03-09 10:00:00")]}})),
    );
    let dispatcher = dispatcher(&script);

    let paginator = WindowPaginator::new(
        at("2024-03-01 00:00:00"),
        at("2024-03-10 00:00:00"),
        Duration::days(7),
        "startTime",
        "endTime",
    );
    let points: Vec<crate::models::TelemetryPoint> =
        Pager::new(paginator, RecordShape::counted("data.telemetries", "data.count"))
            .into_stream(&dispatcher, RequestSpec::get("equipment/1/A1/data"))
            .map(|r| r.unwrap())
            .collect()
            .await;

    assert_eq!(points.len(), 2);
    assert!(points[0].date < points[1].date);
    let starts: Vec<String> = script
        .requests()
        .iter()
        .map(|r| r.query["startTime"].clone())
        .collect();
    assert_eq!(starts, vec!["2024-03-01 00:00:00", "2024-03-08 00:00:00"]);
}
