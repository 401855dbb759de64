//! Startup Pipeline
//!
//! Fetch, shape and present, run once before the server starts.

use serde::Serialize;

use crate::presenter::{present, Layout, PresentOptions};
use crate::shape::ShapedData;
use crate::source::{fetch, CovidSource};

/// Where the dashboard data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataStatus {
    /// Both upstream calls succeeded (the data may still have no rows)
    Loaded,
    /// The fetch failed and the empty fallback is shown
    Fallback,
}

/// Fetch and shape the dashboard data
///
/// A failed fetch is logged and degrades to [`ShapedData::empty`]; callers
/// that want the failure itself should use [`fetch`] directly.
pub async fn run<S: CovidSource + ?Sized>(source: &S) -> ShapedData {
    load(source).await.0
}

/// Like [`run`], also reporting whether the fetch succeeded
pub async fn load<S: CovidSource + ?Sized>(source: &S) -> (ShapedData, DataStatus) {
    let raw = match fetch(source).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(source = source.name(), error = %e, "Error fetching data, serving empty dashboard");
            return (ShapedData::empty(), DataStatus::Fallback);
        }
    };

    let data = ShapedData::from_raw(&raw);

    let unmapped = data.countries.unmapped().count();
    tracing::info!(
        countries = data.countries.len(),
        unmapped,
        days = data.historical.len(),
        "Shaped dashboard data"
    );

    if !data.historical.skipped().is_empty() {
        tracing::warn!(
            skipped = data.historical.skipped().len(),
            first = %data.historical.skipped()[0],
            "Dropped historical entries with unparseable dates"
        );
    }

    if !data.historical.is_chronological() {
        tracing::warn!("Historical series is not in chronological order; charting as delivered");
    }

    (data, DataStatus::Loaded)
}

/// Shaped data together with its rendered presentation
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub data: ShapedData,
    pub layout: Layout,
    pub status: DataStatus,
    #[serde(skip)]
    html: String,
}

impl Dashboard {
    /// Present `data` and pre-render the HTML page
    ///
    /// The status starts as [`DataStatus::Loaded`]; see [`Dashboard::with_status`].
    pub fn build(
        data: ShapedData,
        options: &PresentOptions,
        plotly_js_url: &str,
    ) -> serde_json::Result<Self> {
        let layout = present(&data, options);
        let html = layout.render_html(plotly_js_url)?;

        Ok(Self {
            data,
            layout,
            status: DataStatus::Loaded,
            html,
        })
    }

    /// Record how the data was obtained
    pub fn with_status(mut self, status: DataStatus) -> Self {
        self.status = status;
        self
    }

    /// The rendered page
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Whether the page was built from the empty fallback
    pub fn is_degraded(&self) -> bool {
        self.status == DataStatus::Fallback
    }
}
