//! Application error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-level errors
///
/// Every variant serializes to the wire protocol's `{"error": "<message>"}`
/// body with the status code mapped in [`AppError::status_code`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Request payload could not be parsed; no backend call is attempted
    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    /// Alias not present in the model registry; no backend call is attempted
    #[error("Unknown model: {requested}. Available: {available}")]
    UnknownModel { requested: String, available: String },

    /// Backend invocation failed (auth, transport, or upstream error status)
    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownModel { .. } => StatusCode::NOT_FOUND,
            AppError::BackendError(_)
            | AppError::HttpClient(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_model_message_lists_aliases() {
        let err = AppError::UnknownModel {
            requested: "foo".to_string(),
            available: "claude-sonnet, gpt-5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown model: foo. Available: claude-sonnet, gpt-5"
        );
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            AppError::MalformedBody("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UnknownModel {
                requested: "x".into(),
                available: String::new()
            }
            .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BackendError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
