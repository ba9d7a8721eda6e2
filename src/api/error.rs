//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::series::SeriesError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Series construction or lookup error
    #[error("{0}")]
    Series(#[from] SeriesError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

impl ApiError {
    /// HTTP status and machine-readable code
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Series(e) => match e {
                SeriesError::MalformedSeries { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_SERIES")
                }
                SeriesError::ColumnNotFound(_) => (StatusCode::NOT_FOUND, "COLUMN_NOT_FOUND"),
                SeriesError::InvalidRange { .. } | SeriesError::UnknownPeriod(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
                }
                SeriesError::Csv(_) => (StatusCode::BAD_REQUEST, "CSV_ERROR"),
                SeriesError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            },
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_series_is_unprocessable() {
        let err = ApiError::from(SeriesError::malformed("US_10Y", "dates not strictly ascending"));
        assert_eq!(
            err.status_and_code(),
            (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_SERIES")
        );
    }

    #[test]
    fn test_column_not_found_is_404() {
        let err = ApiError::from(SeriesError::ColumnNotFound("EUR/USD".to_string()));
        assert_eq!(err.status_and_code().0, StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Column not found: EUR/USD");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::Validation("threshold must be positive".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
