//! Statistics Source
//!
//! Fetches the two raw payloads the dashboard is built from.
//!
//! ## Architecture
//!
//! - **CovidSource**: trait over anything that can produce the payloads
//! - **DiseaseShClient**: REST client for the public disease.sh API
//! - **fetch**: runs both calls, all-or-nothing
//!
//! The two calls are issued one after the other. If either fails the whole
//! fetch fails; callers never see half a dataset.

mod client;
mod error;
mod types;

pub use client::{DiseaseShClient, DiseaseShConfig, DEFAULT_COUNTRIES_URL, DEFAULT_HISTORICAL_URL};
pub use error::{FetchError, FetchResult};
pub use types::{CountryInfo, CountryRecord, HistoricalPayload, RawData};

use async_trait::async_trait;

/// Common trait for statistics sources
#[async_trait]
pub trait CovidSource: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Current per-country snapshot
    async fn countries(&self) -> FetchResult<Vec<CountryRecord>>;

    /// Global cumulative time series
    async fn historical(&self) -> FetchResult<HistoricalPayload>;
}

/// Fetch both payloads from `source`, sequentially
///
/// Single attempt per call. The first failure aborts the operation and is
/// returned as-is.
pub async fn fetch<S: CovidSource + ?Sized>(source: &S) -> FetchResult<RawData> {
    let countries = source.countries().await?;
    tracing::debug!(source = source.name(), countries = countries.len(), "Fetched country snapshot");

    let historical = source.historical().await?;
    tracing::debug!(source = source.name(), days = historical.cases.len(), "Fetched historical series");

    Ok(RawData {
        countries,
        historical,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory source that can be told to fail either call
    struct StubSource {
        fail_countries: bool,
        fail_historical: bool,
        historical_calls: AtomicUsize,
    }

    impl StubSource {
        fn new(fail_countries: bool, fail_historical: bool) -> Self {
            Self {
                fail_countries,
                fail_historical,
                historical_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CovidSource for StubSource {
        fn name(&self) -> &str {
            "stub"
        }

        async fn countries(&self) -> FetchResult<Vec<CountryRecord>> {
            if self.fail_countries {
                return Err(FetchError::Connect {
                    url: "stub://countries".into(),
                });
            }
            Ok(vec![CountryRecord::new("A", 1, 0, 0)])
        }

        async fn historical(&self) -> FetchResult<HistoricalPayload> {
            self.historical_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_historical {
                return Err(FetchError::Timeout {
                    url: "stub://historical".into(),
                });
            }
            Ok(HistoricalPayload::from_cases([("1/1/21", 100)]))
        }
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let source = StubSource::new(false, false);
        let raw = fetch(&source).await.unwrap();
        assert_eq!(raw.countries.len(), 1);
        assert_eq!(raw.historical.cases.len(), 1);
    }

    #[tokio::test]
    async fn test_countries_failure_skips_second_call() {
        let source = StubSource::new(true, false);
        let err = fetch(&source).await.unwrap_err();
        assert!(matches!(err, FetchError::Connect { .. }));
        assert_eq!(source.historical_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_historical_failure_discards_countries() {
        let source = StubSource::new(false, true);
        let err = fetch(&source).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout { .. }));
    }
}
