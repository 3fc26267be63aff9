//! JSON error responses

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::ports::TaskStoreError;
use crate::application::SubmitError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error returned by handlers, rendered as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<SubmitError> for ApiError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Unavailable(e) => {
                tracing::error!(error = %e, "Upload rejected: transcriber unavailable");
                Self::internal(e.to_string())
            }
            SubmitError::Staging(e) => {
                tracing::error!(error = %e, "Failed to stage upload");
                Self::internal("Failed to save uploaded file")
            }
            SubmitError::Store(e) => {
                tracing::error!(error = %e, "Failed to create task");
                Self::internal(e.to_string())
            }
        }
    }
}

impl From<TaskStoreError> for ApiError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(_) => Self::not_found("Task not found"),
            other => {
                tracing::error!(error = %other, "Task store failure");
                Self::internal(other.to_string())
            }
        }
    }
}

/// Keeps the status axum assigns (413 for an oversized body, 400 otherwise)
impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        tracing::warn!(error = %err, "Failed to read multipart body");
        Self::new(err.status(), err.body_text())
    }
}
