use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Instant;

use crate::backend::BackendClient;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Health check handler. Always 200; a backend outage only degrades it.
pub async fn health_check(State(client): State<BackendClient>) -> Json<HealthResponse> {
    let (status, backend) = match client.probe().await {
        Ok(()) => ("ok", "reachable".to_string()),
        Err(reason) => ("degraded", format!("unreachable: {reason}")),
    };

    let uptime = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);

    Json(HealthResponse {
        status: status.to_string(),
        backend,
        uptime_seconds: uptime,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /health`, ready to merge into the app router.
pub fn health_router(client: BackendClient) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(client)
}
