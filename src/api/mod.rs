//! Dashboard HTTP API
//!
//! Serves the dashboard built at startup, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Rendered HTML dashboard
//!
//! ## Data
//! - `GET /api/v1/dashboard` - Layout tree
//! - `GET /api/v1/countries` - Per-country table
//! - `GET /api/v1/historical` - Global time series
//! - `GET /api/v1/totals` - Global totals
//! - `GET /api/v1/figures/:id` - Chart specification (`world-map`, `time-series-chart`)
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use covid_dashboard::api::{serve, AppState};
//! use covid_dashboard::config::ServerConfig;
//! use covid_dashboard::pipeline::Dashboard;
//! use covid_dashboard::presenter::PresentOptions;
//! use covid_dashboard::shape::ShapedData;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let dashboard = Dashboard::build(
//!         ShapedData::empty(),
//!         &PresentOptions::default(),
//!         &config.plotly_js_url,
//!     )?;
//!
//!     serve(AppState::new(dashboard, config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/dashboard", get(routes::dashboard::get_layout))
        .route("/countries", get(routes::dashboard::get_countries))
        .route("/historical", get(routes::dashboard::get_historical))
        .route("/totals", get(routes::dashboard::get_totals))
        .route("/figures/:id", get(routes::dashboard::get_figure));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the dashboard server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
