//! Error types for the HTTP layer and the JSON envelope they render to.
//!
//! Every non-2xx response carries the same body:
//!
//! ```json
//! { "timestamp": "2024-05-01T12:00:00+00:00", "status": 400,
//!   "error": "Bad Request", "message": "...", "path": "/api/directors" }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the HTTP layer can refuse a request for
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("Parameter '{0}' cannot be empty or blank")]
    BlankParameter(&'static str),

    #[error("Invalid value for parameter '{name}': '{value}' must be a valid number")]
    NotANumber { name: &'static str, value: String },

    #[error("Threshold must be a non-negative integer")]
    NegativeThreshold,

    #[error("Invalid request.")]
    MalformedQuery,

    #[error("The movies service is currently unavailable. Please try again later.")]
    UpstreamUnavailable,

    #[error("No resource found at this path.")]
    NotFound,

    #[error("Request method is not supported for this path.")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_)
            | ApiError::BlankParameter(_)
            | ApiError::NotANumber { .. }
            | ApiError::NegativeThreshold
            | ApiError::MalformedQuery => StatusCode::BAD_REQUEST,
            ApiError::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Attach the request path so the error can be rendered.
    pub fn at(self, path: impl Into<String>) -> ApiRejection {
        ApiRejection {
            error: self,
            path: path.into(),
        }
    }
}

/// Standard error body returned for every failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: message.into(),
            path: path.into(),
        }
    }
}

/// An `ApiError` bound to the path it happened on; this is what handlers return.
#[derive(Debug)]
pub struct ApiRejection {
    pub error: ApiError,
    pub path: String,
}

impl IntoResponse for ApiRejection {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let body = ErrorResponse::new(status, self.error.to_string(), self.path);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MissingParameter("threshold").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NegativeThreshold.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::UpstreamUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn test_error_body() {
        let body = ErrorResponse::new(
            StatusCode::SERVICE_UNAVAILABLE,
            ApiError::UpstreamUnavailable.to_string(),
            "/api/directors",
        );

        assert_eq!(body.status, 503);
        assert_eq!(body.error, "Service Unavailable");
        assert_eq!(
            body.message,
            "The movies service is currently unavailable. Please try again later."
        );
        assert_eq!(body.path, "/api/directors");
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }

    #[test]
    fn test_messages() {
        let err = ApiError::NotANumber {
            name: "threshold",
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for parameter 'threshold': 'abc' must be a valid number"
        );
        assert_eq!(
            ApiError::BlankParameter("threshold").to_string(),
            "Parameter 'threshold' cannot be empty or blank"
        );
    }
}
