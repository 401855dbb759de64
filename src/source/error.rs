//! Fetch error types
//!
//! Every way the two upstream calls can fail collapses into one
//! `FetchError`; the pipeline treats any of them as "no data".

use thiserror::Error;

/// Errors that can occur while fetching from the statistics API
#[derive(Error, Debug)]
pub enum FetchError {
    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Upstream host unreachable
    #[error("Connection to {url} failed")]
    Connect { url: String },

    /// Upstream did not answer in time
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Upstream answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body was not JSON, or not the expected shape
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl FetchError {
    /// Classify a transport error raised while sending a request
    pub(crate) fn from_send(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            FetchError::Connect {
                url: url.to_string(),
            }
        } else {
            FetchError::Request(err)
        }
    }
}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
