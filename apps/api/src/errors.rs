use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::parser::ParseError;
use crate::search_config::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A strict single-record operation could not produce a complete record.
    #[error("No data: {0}")]
    NoData(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration store error: {0}")]
    Store(#[from] StoreError),

    #[error("Extraction error: {0}")]
    Extract(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NoData(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "NO_DATA", msg.clone()),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI provider error occurred".to_string(),
                )
            }
            AppError::Parse(e) => {
                tracing::error!("Parse error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PARSE_ERROR",
                    "The AI response could not be parsed".to_string(),
                )
            }
            AppError::Store(e) => match e {
                StoreError::DuplicateName(name) => (
                    StatusCode::CONFLICT,
                    "DUPLICATE_NAME",
                    format!("A search configuration named '{name}' already exists"),
                ),
                StoreError::UnknownConfig(name) => (
                    StatusCode::NOT_FOUND,
                    "UNKNOWN_CONFIG",
                    format!("No search configuration named '{name}'"),
                ),
                _ => {
                    tracing::error!("Store error: {e}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "STORE_ERROR",
                        "A configuration store error occurred".to_string(),
                    )
                }
            },
            AppError::Extract(msg) => {
                tracing::error!("Extraction error: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    msg.clone(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
