//! Session inspection HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/sessions       - List active session ids
//! - GET    /api/sessions/{id}  - Turn history for a session (empty if unknown)
//! - DELETE /api/sessions/{id}  - Clear a session (no-op if unknown)

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use parley_types::conversation::Turn;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionListBody {
    pub sessions: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionBody {
    pub session_id: String,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearSessionBody {
    pub session_id: String,
    pub cleared: bool,
    /// Whether the session held any history before the clear.
    pub existed: bool,
}

/// GET /api/sessions - List active session ids, sorted.
pub async fn list_sessions(State(state): State<AppState>) -> Json<SessionListBody> {
    let mut sessions = state.store().session_ids();
    sessions.sort();
    let count = sessions.len();
    Json(SessionListBody { sessions, count })
}

/// GET /api/sessions/{id} - Get a session's turns.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<SessionBody> {
    let turns = state.store().get_conversation(&session_id);
    Json(SessionBody { session_id, turns })
}

/// DELETE /api/sessions/{id} - Remove a session's history.
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<ClearSessionBody> {
    let existed = state.store().clear_conversation(&session_id);
    tracing::info!(%session_id, existed, "session cleared");
    Json(ClearSessionBody {
        session_id,
        cleared: true,
        existed,
    })
}
