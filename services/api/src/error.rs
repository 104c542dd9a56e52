//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service, covering both
//! startup failures and per-request failures. Request-path variants carry an
//! HTTP status and render as a JSON body of the form
//! `{"error": <message>, "status": <code>}`.

use crate::config::ConfigError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use guide_core::ports::StoreError;
use tracing::error;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A precondition conflict, e.g. signing up with an email already taken.
    #[error("{0}")]
    Conflict(String),

    /// Bad credentials on login.
    #[error("Invalid credentials")]
    Unauthorized,

    /// The referenced document does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A malformed identifier or otherwise unusable request value.
    #[error("{0}")]
    BadRequest(String),

    /// The store connection handle is absent at call time.
    #[error("Database not available")]
    StoreUnavailable,

    /// An error that propagated up from the document store port.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Conflict(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(StoreError::InvalidId(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The user-visible message. Internal details are logged, not exposed.
    fn message(&self) -> String {
        match self {
            ApiError::Store(StoreError::InvalidId(_)) => self.to_string(),
            ApiError::Store(_) | ApiError::Internal(_) | ApiError::Config(_) | ApiError::Io(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {:?}", self);
        }
        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}
