//! Functional tests for the HTTP routes.
//!
//! These drive the full router with in-process requests, from query parsing
//! through the services to the JSON bodies.

#![cfg(feature = "http-server")]

mod support;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use irt_dashboard::http::{create_router, AppState};
use irt_dashboard::io::{load_table, DEFAULT_TIMESTAMP_COLUMN};
use irt_dashboard::services::DashboardContext;
use irt_dashboard::transformations::DEFAULT_BUCKET_MINUTES;

use support::{fixture_channels, logger_export};

fn app() -> Router {
    let file = logger_export();
    let table = load_table(file.path(), DEFAULT_TIMESTAMP_COLUMN, &fixture_channels())
        .expect("Should load fixture");
    create_router(AppState::new(DashboardContext::new(table, DEFAULT_BUCKET_MINUTES)))
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_index_page() {
    let (status, body) = get("/").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("IRT Temperature Dashboard"));
    assert!(html.contains("Select IRTs to plot:"));
    assert!(html.contains("Select IRTs for error bars plot:"));
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get_json("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["buckets"], 6);
    assert_eq!(body["channels"], 4);
}

#[tokio::test]
async fn test_channels_and_defaults() {
    let (status, body) = get_json("/v1/channels").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["options"].as_array().unwrap().len(), 4);
    assert_eq!(body["options"][0]["value"], "IRT_A");
    assert_eq!(body["options"][0]["label"], "Sensor A");
    assert_eq!(body["plot_default"].as_array().unwrap().len(), 4);
    assert_eq!(body["error_bars_default"], serde_json::json!(["IRT_A", "IRT_B"]));
}

#[tokio::test]
async fn test_plot_default_and_explicit_selection() {
    let (status, body) = get_json("/v1/plot").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
    assert_eq!(body["layout"]["hovermode"], "x");

    let (status, body) = get_json("/v1/plot?channels=IRT_C,IRT_A").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "IRT_C");
    assert_eq!(body["data"][1]["name"], "IRT_A");
    assert_eq!(body["data"][0]["type"], "scatter");
    assert_eq!(body["data"][1]["x"][1], "2024-07-01T10:05:00");
}

#[tokio::test]
async fn test_error_bars_follow_pick_order() {
    let (status, body) = get_json("/v1/error-bars?channels=IRT_B,IRT_A").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["summary"],
        "Paired t-test between IRT_B and IRT_A:\nt-stat = -3.2733, p-value = 0.0221"
    );
    assert_eq!(body["figure"]["data"][0]["name"], "IRT_B");
}

#[tokio::test]
async fn test_page_sends_channels_in_pick_order() {
    let (_, body) = get("/").await;
    let html = String::from_utf8(body).unwrap();

    assert!(html.contains("pickOrder[view].push(value)"));
    assert!(!html.contains("input:checked"));
}

#[tokio::test]
async fn test_plot_empty_selection() {
    let (status, body) = get_json("/v1/plot?channels=").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_error_bars_default_is_paired_test() {
    let (status, body) = get_json("/v1/error-bars").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["summary"],
        "Paired t-test between IRT_A and IRT_B:\nt-stat = 3.2733, p-value = 0.0221"
    );
    assert_eq!(body["figure"]["data"][0]["error_y"]["color"], "gray");
    assert!(body["figure"]["data"][0]["error_y"]["array"][0].is_null());
}

#[tokio::test]
async fn test_error_bars_three_channels() {
    let (status, body) = get_json("/v1/error-bars?channels=IRT_A,IRT_B,IRT_C").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["summary"].as_str().unwrap().contains("Anova"));
}

#[tokio::test]
async fn test_unknown_channel_is_bad_request() {
    let (status, body) = get_json("/v1/plot?channels=IRT_A,IRT_Z").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("IRT_Z"));
}

#[tokio::test]
async fn test_degenerate_comparison_is_unprocessable() {
    let (status, body) = get_json("/v1/error-bars?channels=IRT_A,IRT_D").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "STATS_ERROR");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, _) = get("/v1/readings").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
