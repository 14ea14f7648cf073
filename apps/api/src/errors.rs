use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::checkout::stripe::PaymentError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Callers only ever see the HTTP status and a flat `{"error": "..."}` message;
/// the detail carried by each variant is logged server-side.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to parse reading: {0}")]
    ParseFailure(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Checkout error: {0}")]
    Checkout(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Analysis(e.to_string())
    }
}

impl From<PaymentError> for AppError {
    fn from(e: PaymentError) -> Self {
        AppError::Checkout(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ParseFailure(detail) => {
                tracing::error!("Reading parse error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse response".to_string(),
                )
            }
            AppError::Analysis(detail) => {
                tracing::error!("Analysis error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Analysis failed".to_string(),
                )
            }
            AppError::Checkout(detail) => {
                tracing::error!("Checkout error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Checkout failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
