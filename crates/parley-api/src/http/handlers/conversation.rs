//! Model-backed conversation endpoints.
//!
//! Endpoints:
//! - POST /api/generate-response    - Continue a session's conversation
//! - POST /api/conversation-report  - Language skills report for a transcript
//!
//! Missing fields are not errors: `userInput` and `conversationText` default
//! to the empty string and `sessionId` defaults to `"default"`.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use parley_types::conversation::DEFAULT_SESSION_ID;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for `POST /api/generate-response`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponseRequest {
    #[serde(default)]
    pub user_input: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Success body for `POST /api/generate-response`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponseBody {
    pub text: String,
    pub session_id: String,
}

/// Request body for `POST /api/conversation-report`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationReportRequest {
    #[serde(default)]
    pub conversation_text: Option<String>,
}

/// Success body for `POST /api/conversation-report`.
#[derive(Debug, Serialize)]
pub struct ConversationReportBody {
    pub text: String,
}

/// POST /api/generate-response - Record the user turn and reply to it.
pub async fn generate_response(
    State(state): State<AppState>,
    payload: Result<Json<GenerateResponseRequest>, JsonRejection>,
) -> Result<Json<GenerateResponseBody>, AppError> {
    let Json(body) = payload?;
    let start = Instant::now();
    let request_id = Uuid::now_v7();

    let user_input = body.user_input.unwrap_or_default();
    let session_id = body
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    tracing::debug!(%request_id, %session_id, input_len = user_input.len(), "generate-response");

    let reply = state
        .conversations
        .generate_response(&session_id, &user_input)
        .await
        .map_err(AppError::chat)?;

    tracing::info!(
        %request_id,
        session_id = %reply.session_id,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "response generated"
    );

    Ok(Json(GenerateResponseBody {
        text: reply.text,
        session_id: reply.session_id,
    }))
}

/// POST /api/conversation-report - Assess a transcript. Never touches session history.
pub async fn conversation_report(
    State(state): State<AppState>,
    payload: Result<Json<ConversationReportRequest>, JsonRejection>,
) -> Result<Json<ConversationReportBody>, AppError> {
    let Json(body) = payload?;
    let start = Instant::now();
    let request_id = Uuid::now_v7();

    let transcript = body.conversation_text.unwrap_or_default();

    let text = state
        .conversations
        .conversation_report(&transcript)
        .await
        .map_err(AppError::report)?;

    tracing::info!(
        %request_id,
        transcript_len = transcript.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "conversation report generated"
    );

    Ok(Json(ConversationReportBody { text }))
}
