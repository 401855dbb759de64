//! API Error Types
//!
//! Everything the dashboard server can fail with after startup, and how
//! each failure is reported to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::presenter::{LINE_GRAPH_ID, MAP_GRAPH_ID};

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// No graph on the page has this element id
    #[error(
        "Unknown figure '{0}' (expected one of: {known})",
        known = format!("{}, {}", MAP_GRAPH_ID, LINE_GRAPH_ID)
    )]
    FigureNotFound(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Listener could not be bound
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::FigureNotFound(_) => (StatusCode::NOT_FOUND, "FIGURE_NOT_FOUND"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        // Lookups of unknown figures are client mistakes, not server faults
        if status.is_server_error() {
            tracing::error!(request_id = %request_id, error_code = %code, error_message = %self, "API error");
        } else {
            tracing::debug!(request_id = %request_id, error_code = %code, error_message = %self, "API request rejected");
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
