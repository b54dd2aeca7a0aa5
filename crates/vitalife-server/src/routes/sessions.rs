//! Session lifecycle routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use vitalife_core::Error;

use super::{api_error, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/{sid}", get(get_session).delete(end_session))
        .route("/sessions/{sid}/user", post(rotate_user))
}

async fn create_session(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let session = state.sessions.create();
    let session = session.lock();
    Json(serde_json::json!({
        "sessionId": session.id(),
        "currentUserId": session.current_user_id(),
        "createdAt": session.created_at().to_rfc3339(),
    }))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<String>,
) -> ApiResult {
    let session = state.session(&sid).map_err(api_error)?;
    let session = session.lock();
    Ok(Json(serde_json::json!({
        "sessionId": session.id(),
        "currentUserId": session.current_user_id(),
        "createdAt": session.created_at().to_rfc3339(),
        "turns": session.history().len(),
        "profiles": session.profile_count(),
    })))
}

async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<String>,
) -> ApiResult {
    if !state.sessions.remove(&sid) {
        return Err(api_error(Error::NotFound(format!("session {}", sid))));
    }
    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/sessions/{sid}/user — start over as a new user id.
async fn rotate_user(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<String>,
) -> ApiResult {
    let session = state.session(&sid).map_err(api_error)?;
    let mut session = session.lock();
    let user_id = session.new_user_id().to_string();
    Ok(Json(serde_json::json!({ "currentUserId": user_id })))
}
