use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const MISSING_CREDENTIALS_DETAIL: &str = "OPENROUTER_API_KEY not configured";
pub const UPSTREAM_FAILURE_DETAIL: &str =
    "OpenRouter request failed. Check server logs for details.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// The body is always `{"detail": <message>}`; internal error text is only
/// ever written to the server log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("OpenRouter API key is not configured")]
    MissingCredentials,

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::MissingCredentials => (
                StatusCode::INTERNAL_SERVER_ERROR,
                MISSING_CREDENTIALS_DETAIL.to_string(),
            ),
            AppError::Upstream(msg) => {
                tracing::error!("OpenRouter request failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    UPSTREAM_FAILURE_DETAIL.to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
