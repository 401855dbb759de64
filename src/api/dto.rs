//! Data Transfer Objects
//!
//! Response types for the API endpoints.

use serde::Serialize;

use crate::presenter::format_count;
use crate::shape::GlobalTotals;

// ============================================
// TOTALS DTOs
// ============================================

/// Global totals response
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub cases: u64,
    pub deaths: u64,
    pub recovered: u64,
    /// The same values as displayed on the page
    pub formatted: FormattedTotals,
}

/// Thousands-grouped totals
#[derive(Debug, Serialize)]
pub struct FormattedTotals {
    pub cases: String,
    pub deaths: String,
    pub recovered: String,
}

impl From<GlobalTotals> for TotalsResponse {
    fn from(t: GlobalTotals) -> Self {
        Self {
            cases: t.cases,
            deaths: t.deaths,
            recovered: t.recovered,
            formatted: FormattedTotals {
                cases: format_count(t.cases),
                deaths: format_count(t.deaths),
                recovered: format_count(t.recovered),
            },
        }
    }
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Data status: loaded, empty
    pub data: String,
    /// Number of countries in the snapshot
    pub countries: usize,
    /// Number of days in the series
    pub days: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
