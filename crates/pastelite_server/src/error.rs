//! HTTP error mapping for API handlers.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pastelite_core::AppError;
use serde_json::json;

/// Message shared by every unavailable outcome (missing, expired, exhausted).
pub const NOT_AVAILABLE_MESSAGE: &str = "Paste not found or no longer available";

/// Error returned by handlers, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The single 404 used for every unreadable paste.
    pub fn not_available() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_AVAILABLE_MESSAGE)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(message) => Self::new(StatusCode::BAD_REQUEST, message),
            AppError::StorageTimeout(timeout) => {
                tracing::error!("Store call timed out after {:?}", timeout);
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "Storage temporarily unavailable")
            }
            other => {
                tracing::error!("Storage error: {}", other);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            StatusCode::PAYLOAD_TOO_LARGE
        } else {
            StatusCode::BAD_REQUEST
        };
        Self::new(status, rejection.body_text())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::HttpError;
    use axum::http::StatusCode;
    use pastelite_core::AppError;
    use std::time::Duration;

    #[test]
    fn app_errors_map_to_expected_statuses() {
        let cases = [
            (AppError::Validation("bad".to_string()), StatusCode::BAD_REQUEST),
            (
                AppError::StorageTimeout(Duration::from_millis(10)),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::StorageMessage("disk on fire".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(HttpError::from(err).status(), expected);
        }
    }

    #[test]
    fn storage_details_are_not_exposed() {
        let err = HttpError::from(AppError::StorageMessage("secret path /var/db".to_string()));
        assert!(!err.message().contains("/var/db"));
    }
}
