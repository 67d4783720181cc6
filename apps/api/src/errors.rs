use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::analysis::normalizer::ParseFailure;
use crate::analysis::schema::SchemaError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{"success": false, "error": ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Malformed request: {0}")]
    MalformedInput(String),

    #[error("{0}")]
    Upstream(#[from] LlmError),

    #[error("{0}")]
    Parse(#[from] ParseFailure),

    #[error("{source}")]
    Schema {
        source: SchemaError,
        raw_response: String,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
struct FailureBody<'a> {
    success: bool,
    error: String,
    /// Only present when the model answered but the answer was unusable.
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_response: Option<&'a str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, raw_response) = match &self {
            AppError::MalformedInput(msg) => {
                tracing::warn!("Malformed request: {msg}");
                (StatusCode::BAD_REQUEST, None)
            }
            AppError::Upstream(e) => {
                tracing::error!("LLM error: {e}");
                (StatusCode::BAD_GATEWAY, None)
            }
            AppError::Parse(failure) => {
                tracing::error!("Unparseable AI response: {}", failure.message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Some(failure.raw_response.as_str()),
                )
            }
            AppError::Schema {
                source,
                raw_response,
            } => {
                tracing::error!("AI response failed schema validation: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, Some(raw_response.as_str()))
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let error = match &self {
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        let body = FailureBody {
            success: false,
            error,
            raw_response,
        };

        (status, Json(body)).into_response()
    }
}
