//! Application error type mapping to HTTP status codes.
//!
//! Failure bodies keep the `{error, text}` shape: `text` is a fixed,
//! user-facing message and `error` carries the diagnostic detail.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use parley_types::llm::LlmError;

/// Shown to the user when a chat reply could not be generated.
pub const CHAT_APOLOGY: &str = "I'm sorry, but I'm having trouble generating a response right now.";

/// Shown to the user when a conversation report could not be generated.
pub const REPORT_FALLBACK: &str = "Unable to generate conversation report at this time.";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The model call failed; `fallback` is the fixed user-facing text.
    ModelService {
        error: LlmError,
        fallback: &'static str,
    },
    /// The request body was not valid JSON.
    BadRequest(String),
}

impl AppError {
    pub fn chat(error: LlmError) -> Self {
        AppError::ModelService {
            error,
            fallback: CHAT_APOLOGY,
        }
    }

    pub fn report(error: LlmError) -> Self {
        AppError::ModelService {
            error,
            fallback: REPORT_FALLBACK,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::ModelService { error, fallback } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": error.to_string(),
                    "text": fallback,
                })),
            )
                .into_response(),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}
