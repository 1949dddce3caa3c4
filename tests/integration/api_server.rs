//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, and thesis evaluation.


use serde_json::{json, Value};

use test_utils::{bullish_open_snapshot, TestApiServer};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "yodha-thesis-engine");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains("http_requests_total"), "Expected http_requests_total metric");
    assert!(
        body.contains("http_request_duration_seconds"),
        "Expected http_request_duration_seconds metric"
    );
    assert!(
        body.contains("http_requests_in_flight"),
        "Expected http_requests_in_flight metric"
    );
}

#[tokio::test]
async fn metrics_track_request_count() {
    let app = TestApiServer::new().await;
    for _ in 0..3 {
        let _ = app.server.get("/health").await;
    }

    assert!(app.metrics.http_requests_total.get() >= 3);
    assert_eq!(app.metrics.http_requests_in_flight.get(), 0);
}

#[tokio::test]
async fn thesis_endpoint_returns_bullish_report() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/thesis")
        .json(&bullish_open_snapshot())
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["thesis"]["bias"], "BULLISH");
    assert_eq!(body["thesis"]["oneLiner"], "Bullish bias | — move probability");
    assert_eq!(body["thesis"]["setup"]["targets"][0], "$105.00 (Call Wall)");
    assert_eq!(body["confluence"]["bullish"], 2);
    assert_eq!(body["signals"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["signals"][0]["label"], "Options Flow");
}

#[tokio::test]
async fn thesis_endpoint_records_outcome_metric() {
    let app = TestApiServer::new().await;
    let _ = app
        .server
        .post("/api/thesis")
        .json(&bullish_open_snapshot())
        .await;

    let counter = app
        .metrics
        .theses_total
        .with_label_values(&["open", "BULLISH"])
        .get();
    assert_eq!(counter, 1);

    let body = app.server.get("/metrics").await.text();
    assert!(body.contains("theses_total"));
}

#[tokio::test]
async fn closed_session_thesis_is_neutral() {
    let app = TestApiServer::new().await;
    let mut snapshot = bullish_open_snapshot();
    snapshot["marketSession"] = json!("closed");

    let response = app.server.post("/api/thesis").json(&snapshot).await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["thesis"]["bias"], "NEUTRAL");
    assert!(body["thesis"]["risk"].is_null());
    assert!(body["thesis"]["setup"]["entry"].is_null());
    assert_eq!(body["signals"][0]["bias"], "NO_DATA");
}

#[tokio::test]
async fn signals_endpoint_returns_four_signals() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/signals")
        .json(&bullish_open_snapshot())
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let labels: Vec<&str> = body["signals"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["label"].as_str())
        .collect();
    assert_eq!(
        labels,
        vec!["Options Flow", "Dark Pool", "News Sentiment", "Relative Strength"]
    );
    assert_eq!(body["confluence"]["inactive"], 1);
    assert!(body.get("thesis").is_none());
}

#[tokio::test]
async fn missing_session_is_resolved_from_the_clock() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/thesis")
        .json(&json!({ "ticker": "MSFT", "price": 410.0 }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let bias = body["thesis"]["bias"].as_str().unwrap_or_default();
    assert!(["BULLISH", "BEARISH", "NEUTRAL"].contains(&bias));
}

#[tokio::test]
async fn blank_ticker_is_rejected() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/thesis")
        .json(&json!({ "ticker": "  ", "price": 100.0, "marketSession": "open" }))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 422);
}

#[tokio::test]
async fn loosely_typed_snapshot_is_accepted() {
    let app = TestApiServer::new().await;
    let mut snapshot = bullish_open_snapshot();
    snapshot["flowStats"]["tradeCount"] = json!(60.0);
    snapshot["mlPrediction"] = json!({ "has_signal": false });

    let response = app.server.post("/api/thesis").json(&snapshot).await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["signals"][0]["bias"], "BULLISH");
    assert_eq!(body["thesis"]["bias"], "BULLISH");
}
