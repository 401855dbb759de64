//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// The page is built before the listener opens, so a running server is
/// always ready, even when it is serving the empty fallback.
pub async fn readiness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Full health status. `degraded` means the startup fetch failed and the
/// page shows no data.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dashboard = &state.dashboard;
    let degraded = dashboard.is_degraded();

    Json(HealthResponse {
        status: if degraded { "degraded" } else { "healthy" }.to_string(),
        data: if degraded { "empty" } else { "loaded" }.to_string(),
        countries: dashboard.data.countries.len(),
        days: dashboard.data.historical.len(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
