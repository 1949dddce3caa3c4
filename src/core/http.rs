//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::metrics::Metrics;
use crate::models::market::{MarketSession, MarketSnapshot};
use crate::models::signal::Signal;
use crate::signals::{ConfluenceEngine, ConfluenceReport, ConfluenceSummary};

pub const SERVICE_NAME: &str = "yodha-thesis-engine";

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub engine: Arc<ConfluenceEngine>,
}

/// The engine holds no connections, so a running process is a healthy one.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignalsResponse {
    pub signals: Vec<Signal>,
    pub confluence: ConfluenceSummary,
}

/// Reject snapshots without a ticker and fill a missing session from the clock.
fn prepare_snapshot(mut snapshot: MarketSnapshot) -> Result<MarketSnapshot, StatusCode> {
    if snapshot.ticker.trim().is_empty() {
        warn!("Rejected snapshot without a ticker");
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    if snapshot.market_session.is_none() {
        snapshot.market_session = Some(MarketSession::at(Utc::now()));
    }
    Ok(snapshot)
}

/// Build the four domain signals for a snapshot
async fn evaluate_signals(
    State(state): State<AppState>,
    Json(snapshot): Json<MarketSnapshot>,
) -> Result<Json<SignalsResponse>, StatusCode> {
    let snapshot = prepare_snapshot(snapshot)?;
    let signals = state.engine.build_signals(&snapshot);
    let confluence = ConfluenceSummary::from_signals(signals.iter());

    Ok(Json(SignalsResponse {
        signals: signals.into_vec(),
        confluence,
    }))
}

/// Build signals and the unified thesis for a snapshot
async fn evaluate_thesis(
    State(state): State<AppState>,
    Json(snapshot): Json<MarketSnapshot>,
) -> Result<Json<ConfluenceReport>, StatusCode> {
    let snapshot = prepare_snapshot(snapshot)?;
    let report = state.engine.evaluate(&snapshot);
    state
        .metrics
        .record_thesis(snapshot.session(), report.thesis.bias);

    Ok(Json(report))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/signals", post(evaluate_signals))
        .route("/api/thesis", post(evaluate_thesis))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    port: u16,
    engine: ConfluenceEngine,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let metrics = Arc::new(Metrics::new()?);
    let start_time = Arc::new(Instant::now());

    let state = AppState {
        metrics,
        start_time,
        engine: Arc::new(engine),
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
