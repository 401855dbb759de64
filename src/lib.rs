//! # COVID-19 Dashboard
//!
//! Fetches global COVID-19 statistics from the public disease.sh API and
//! serves them as a single-page dashboard: a choropleth map of cases per
//! country, a line chart of cumulative global cases, and three summary
//! counters.
//!
//! ## Pipeline
//!
//! Runs once at startup, strictly one way:
//!
//! 1. [`source`]: two sequential HTTP GETs (country snapshot, historical series)
//! 2. [`shape`]: country table, historical series, global totals
//! 3. [`presenter`]: chart specifications and the layout tree
//! 4. [`api`]: serves the rendered page with Axum
//!
//! A failed fetch does not stop the server; the page is served with zero
//! counters and empty charts instead.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covid_dashboard::{run, Dashboard, DiseaseShClient, DiseaseShConfig, PresentOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DiseaseShClient::new(DiseaseShConfig::default())?;
//!
//!     let data = run(&client).await;
//!     println!(
//!         "{} countries, {} days, {} cases",
//!         data.countries.len(),
//!         data.historical.len(),
//!         data.totals.cases
//!     );
//!
//!     let dashboard = Dashboard::build(data, &PresentOptions::default(), "plotly.min.js")?;
//!     println!("{} bytes of HTML", dashboard.html().len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod pipeline;
pub mod presenter;
pub mod shape;
pub mod source;

// Re-export top-level types for convenience
pub use pipeline::{load, run, Dashboard, DataStatus};

pub use source::{
    fetch, CountryInfo, CountryRecord, CovidSource, DiseaseShClient, DiseaseShConfig, FetchError,
    FetchResult, HistoricalPayload, RawData,
};

pub use shape::{
    shape, CountryRow, CountryTable, GlobalTotals, HistoricalSeries, SeriesPoint, ShapedData,
};

pub use presenter::{format_count, present, Figure, Layout, Node, PresentOptions};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LogFormat, LoggingConfig, ServerConfig, SourceConfig};
