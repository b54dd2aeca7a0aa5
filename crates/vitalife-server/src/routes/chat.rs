//! Chat routes — assess a message and keep the session log.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use super::{api_error, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions/{sid}/chat", post(chat))
        .route(
            "/sessions/{sid}/chat/history",
            get(get_history).delete(clear_history),
        )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    message: String,
    user_id: Option<String>,
    #[serde(default)]
    auto_fill: bool,
}

#[derive(Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

/// POST /api/sessions/{sid}/chat — returns the recorded turn.
async fn chat(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<String>,
    Json(req): Json<ChatRequest>,
) -> ApiResult {
    let session = state.session(&sid).map_err(api_error)?;
    let turn = session
        .lock()
        .record_chat(&state.engine, &req.message, req.user_id.as_deref(), req.auto_fill)
        .map_err(api_error)?;
    Ok(Json(serde_json::to_value(turn).map_err(|e| api_error(e.into()))?))
}

/// GET /api/sessions/{sid}/chat/history — newest first.
async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult {
    let limit = query.limit.unwrap_or(state.config.history_view);
    let session = state.session(&sid).map_err(api_error)?;
    let session = session.lock();
    let turns = session.recent_turns(limit);
    Ok(Json(serde_json::json!({
        "turns": turns,
        "count": turns.len(),
        "total": session.history().len(),
    })))
}

async fn clear_history(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<String>,
) -> ApiResult {
    let session = state.session(&sid).map_err(api_error)?;
    let cleared = session.lock().clear_history();
    Ok(Json(serde_json::json!({ "success": true, "cleared": cleared })))
}
