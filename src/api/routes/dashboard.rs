//! Dashboard Routes
//!
//! The rendered page and read-only JSON views of the data behind it.
//!
//! - GET / - HTML dashboard
//! - GET /api/v1/dashboard - Layout tree
//! - GET /api/v1/countries - Country table
//! - GET /api/v1/historical - Global time series
//! - GET /api/v1/totals - Global totals
//! - GET /api/v1/figures/:id - A single chart specification

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use std::sync::Arc;

use crate::api::dto::TotalsResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::presenter::{Figure, Layout};
use crate::shape::{CountryTable, HistoricalSeries};

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.dashboard.html().to_string())
}

/// GET /api/v1/dashboard
pub async fn get_layout(State(state): State<Arc<AppState>>) -> Json<Layout> {
    Json(state.dashboard.layout.clone())
}

/// GET /api/v1/countries
pub async fn get_countries(State(state): State<Arc<AppState>>) -> Json<CountryTable> {
    Json(state.dashboard.data.countries.clone())
}

/// GET /api/v1/historical
pub async fn get_historical(State(state): State<Arc<AppState>>) -> Json<HistoricalSeries> {
    Json(state.dashboard.data.historical.clone())
}

/// GET /api/v1/totals
pub async fn get_totals(State(state): State<Arc<AppState>>) -> Json<TotalsResponse> {
    Json(state.dashboard.data.totals.into())
}

/// GET /api/v1/figures/:id
///
/// `id` is the element id of the graph on the page.
pub async fn get_figure(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Figure>> {
    state
        .dashboard
        .layout
        .graph(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::FigureNotFound(id))
}
