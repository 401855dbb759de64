//! disease.sh REST API Client
//!
//! HTTP client for the two public endpoints the dashboard reads.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::{FetchError, FetchResult};
use super::types::{CountryRecord, HistoricalPayload};
use super::CovidSource;

/// Default per-country snapshot endpoint
pub const DEFAULT_COUNTRIES_URL: &str = "https://disease.sh/v3/covid-19/countries";

/// Default global time-series endpoint, all available days
pub const DEFAULT_HISTORICAL_URL: &str =
    "https://disease.sh/v3/covid-19/historical/all?lastdays=all";

/// disease.sh API client
pub struct DiseaseShClient {
    client: Client,
    config: DiseaseShConfig,
}

/// Configuration for the disease.sh client
#[derive(Debug, Clone)]
pub struct DiseaseShConfig {
    /// URL of the per-country snapshot
    pub countries_url: String,
    /// URL of the global historical series
    pub historical_url: String,
    /// Per-request timeout; `None` waits for the transport to give up
    pub request_timeout: Option<Duration>,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for DiseaseShConfig {
    fn default() -> Self {
        Self {
            countries_url: DEFAULT_COUNTRIES_URL.to_string(),
            historical_url: DEFAULT_HISTORICAL_URL.to_string(),
            request_timeout: None,
            user_agent: format!("covid-dashboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl DiseaseShClient {
    /// Create a new client with the given configuration
    pub fn new(config: DiseaseShConfig) -> FetchResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &DiseaseShConfig {
        &self.config
    }

    /// Single GET, decoded as JSON. No retry.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> FetchResult<T> {
        tracing::debug!(url = %url, "Fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_send(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_send(url, e))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl CovidSource for DiseaseShClient {
    fn name(&self) -> &str {
        "disease.sh"
    }

    async fn countries(&self) -> FetchResult<Vec<CountryRecord>> {
        self.get_json(&self.config.countries_url).await
    }

    async fn historical(&self) -> FetchResult<HistoricalPayload> {
        self.get_json(&self.config.historical_url).await
    }
}
