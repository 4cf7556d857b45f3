//! HTTP tests driving the full router against an in-memory store.
//!
//! Run with: cargo test --test api_test

mod common;

use std::fs;
use std::path::PathBuf;

use axum::{http::StatusCode, routing::get, Router};
use chrono::{Duration, Utc};
use serde_json::json;

use power_monitor::store::format_timestamp;

use common::{body_bytes, body_json, get as get_uri, post_json};

#[tokio::test]
async fn healthz_returns_ok() {
    let app = common::api_app().await;

    let response = get_uri(&app, "/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn outage_round_trip_through_the_api() {
    let app = common::api_app().await;

    let response = post_json(
        &app,
        "/api/outage",
        json!({
            "start_time": "2025-01-01 12:00:00",
            "date": "2025-01-01",
            "voltage_before": 120.0,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["status"], "Active");
    assert!(created["end_time"].is_null());
    let id = created["id"].as_i64().unwrap();

    let response = post_json(
        &app,
        &format!("/api/outage/{id}/resolve"),
        json!({ "end_time": "2025-01-01 12:30:00", "voltage_after": 118.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_uri(&app, "/api/outages").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([{
            "id": id,
            "start_time": "2025-01-01 12:00:00",
            "end_time": "2025-01-01 12:30:00",
            "date": "2025-01-01",
            "status": "Resolved",
            "voltage_before": 120.0,
            "voltage_after": 118.0,
        }])
    );
}

#[tokio::test]
async fn create_outage_derives_date_from_start_time() {
    let app = common::api_app().await;

    let response = post_json(
        &app,
        "/api/outage",
        json!({ "start_time": "2024-01-15 14:23:00", "voltage_before": 120.5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["date"], "2024-01-15");

    let response = post_json(&app, "/api/outage", json!({ "voltage_before": 119.0 })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let start_time = created["start_time"].as_str().unwrap();
    assert_eq!(created["date"], start_time[..10]);
}

#[tokio::test]
async fn outages_can_be_filtered_by_date_range() {
    let app = common::api_app().await;

    for date in ["2025-01-01", "2025-01-05", "2025-01-09"] {
        let response = post_json(
            &app,
            "/api/outage",
            json!({ "start_time": format!("{date} 08:00:00"), "voltage_before": 120.0 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_uri(&app, "/api/outages?start_date=2025-01-02&end_date=2025-01-09").await;
    assert_eq!(response.status(), StatusCode::OK);
    let dates: Vec<_> = body_json(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["2025-01-05", "2025-01-09"]);

    let response = get_uri(&app, "/api/outages?start_date=2025-01-05&end_date=2025-01-05").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn single_date_lookup_returns_only_that_day() {
    let app = common::api_app().await;

    for date in ["2025-01-01", "2025-01-05"] {
        let response = post_json(
            &app,
            "/api/outage",
            json!({ "start_time": format!("{date} 08:00:00"), "voltage_before": 120.0 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_uri(&app, "/api/outages?date=2025-01-05").await;
    assert_eq!(response.status(), StatusCode::OK);
    let rows = body_json(response).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["date"], "2025-01-05");

    let response = get_uri(&app, "/api/outages?date=2025-01-03").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn single_date_combined_with_range_is_a_bad_request() {
    let app = common::api_app().await;

    let response = get_uri(&app, "/api/outages?date=2025-01-05&start_date=2025-01-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn inverted_date_range_is_a_bad_request() {
    let app = common::api_app().await;

    let response = get_uri(&app, "/api/outages?start_date=2025-02-01&end_date=2025-01-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn malformed_date_is_rejected_by_the_extractor() {
    let app = common::api_app().await;

    let response = get_uri(&app, "/api/outages?start_date=yesterday").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn resolving_unknown_or_resolved_outages_fails() {
    let app = common::api_app().await;

    let response = post_json(&app, "/api/outage/99/resolve", json!({ "voltage_after": 118.0 })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(
        &app,
        "/api/outage",
        json!({ "start_time": "2025-01-01 12:00:00", "voltage_before": 120.0 }),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let uri = format!("/api/outage/{id}/resolve");
    let response = post_json(&app, &uri, json!({ "voltage_after": 118.0 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = post_json(&app, &uri, json!({ "voltage_after": 117.0 })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn measurements_can_be_recorded_and_windowed() {
    let app = common::api_app().await;

    let response = post_json(
        &app,
        "/api/measurement",
        json!({ "voltage": 120.0, "current": 10.0, "power": 1200.0, "energy": 1200.0, "pf": 0.9 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_json(response).await["timestamp"].is_string());

    let response = post_json(
        &app,
        "/api/measurements",
        json!([
            { "timestamp": "2000-01-01 00:00:00", "voltage": 119.0, "current": 9.0, "power": 1071.0, "energy": 1300.0, "pf": 0.95 },
            { "timestamp": "2000-01-01 00:01:00", "voltage": 118.5, "current": 9.5, "power": 1125.0, "energy": 1310.0, "pf": 0.93 },
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await, json!({ "inserted": 2 }));

    let response = get_uri(&app, "/api/measurements").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 3);

    let response = get_uri(&app, "/api/measurements?window=hour").await;
    let recent = body_json(response).await;
    assert_eq!(recent.as_array().unwrap().len(), 1);
    assert_eq!(recent[0]["voltage"], 120.0);

    let response = get_uri(&app, "/api/measurements?window=day").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn week_window_spans_seven_days() {
    let app = common::api_app().await;
    let now = Utc::now();

    let batch: Vec<_> = [Duration::days(8), Duration::days(3), Duration::zero()]
        .into_iter()
        .map(|age| {
            json!({
                "timestamp": format_timestamp(now - age),
                "voltage": 120.0, "current": 10.0, "power": 1200.0, "energy": 1200.0, "pf": 0.9,
            })
        })
        .collect();
    let response = post_json(&app, "/api/measurements", json!(batch)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_uri(&app, "/api/measurements?window=week").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_api_path_is_a_json_404() {
    let app = common::api_app().await;

    let response = get_uri(&app, "/api/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "No API route for /api/nope");
}

#[tokio::test]
async fn frontend_paths_fall_back_to_index_html() {
    let dist = std::env::temp_dir().join(format!("power-monitor-dist-{}", std::process::id()));
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("index.html"), "<div id=\"root\"></div>").unwrap();
    fs::write(dist.join("vite.svg"), "<svg></svg>").unwrap();

    let app = common::test_app(common::memory_store().await, PathBuf::from(&dist));

    let response = get_uri(&app, "/vite.svg").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"<svg></svg>");

    let response = get_uri(&app, "/outages/history").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"<div id=\"root\"></div>");

    fs::remove_dir_all(&dist).ok();
}

#[test]
#[should_panic(expected = "Overlapping method route")]
fn duplicate_route_registration_panics_at_startup() {
    async fn by_range() -> &'static str {
        "range"
    }
    async fn by_date() -> &'static str {
        "date"
    }

    let _ = Router::<()>::new()
        .route("/api/outages", get(by_range))
        .route("/api/outages", get(by_date));
}

#[test]
fn api_routes_register_without_conflicts() {
    let _ = power_monitor::routes::api_router();
}
