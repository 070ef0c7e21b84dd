//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::twitter::KeyStatus;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("{0}")]
    Validation(String),

    /// The active bearer token was rate limited and the ring moved on
    #[error("Rate limit hit on API Key #{previous}. Switched to API Key #{}. Please try again.", .keys.current_api_key)]
    RateLimited { previous: usize, keys: KeyStatus },

    /// Twitter API call failed
    #[error("Twitter API error: {message}")]
    Upstream { message: String, keys: KeyStatus },

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub request_id: String,
    /// Set when repeating the request may succeed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<bool>,
    #[serde(flatten)]
    pub keys: Option<KeyStatus>,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            ApiError::Upstream { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }

    fn key_status(&self) -> Option<KeyStatus> {
        match self {
            ApiError::RateLimited { keys, .. } | ApiError::Upstream { keys, .. } => Some(*keys),
            _ => None,
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
            error: self.to_string(),
            code: code.to_string(),
            request_id,
            retry: matches!(self, ApiError::RateLimited { .. }).then_some(true),
            keys: self.key_status(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(current: usize) -> KeyStatus {
        KeyStatus {
            current_api_key: current,
            total_api_keys: 3,
        }
    }

    #[test]
    fn test_rate_limit_message() {
        let err = ApiError::RateLimited {
            previous: 1,
            keys: keys(2),
        };
        assert_eq!(
            err.to_string(),
            "Rate limit hit on API Key #1. Switched to API Key #2. Please try again."
        );
        assert_eq!(err.status_and_code().0, StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorResponse {
            error: "Keyword is required".into(),
            code: "VALIDATION_ERROR".into(),
            request_id: "id".into(),
            retry: None,
            keys: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "Keyword is required");
        assert!(json.get("retry").is_none());
        assert!(json.get("current_api_key").is_none());

        let body = ErrorResponse {
            retry: Some(true),
            keys: Some(keys(3)),
            ..body
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["retry"], true);
        assert_eq!(json["current_api_key"], 3);
        assert_eq!(json["total_api_keys"], 3);
    }

    #[test]
    fn test_upstream_message() {
        let err = ApiError::Upstream {
            message: "Request failed: timeout".into(),
            keys: keys(1),
        };
        assert_eq!(err.to_string(), "Twitter API error: Request failed: timeout");
        assert_eq!(err.key_status(), Some(keys(1)));
    }
}
