//! Uniform error envelope for HTTP responses.

use crate::task::services::TaskServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Caller-facing failure rendered as `{"status":"error","message":...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit HTTP status.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a `400 Bad Request` error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Maps a service error onto an HTTP error.
    ///
    /// Caller mistakes keep their message. Infrastructure failures are
    /// logged with full detail and answered with a generic message naming
    /// `context`.
    #[must_use]
    pub fn from_service(context: &str, err: &TaskServiceError) -> Self {
        match err {
            TaskServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            _ if err.is_recoverable() => Self::bad_request(err.to_string()),
            _ => {
                tracing::error!(error = %err, context, "request failed");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("unexpected error at {context}"),
                )
            }
        }
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the caller-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "status": "error",
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}
