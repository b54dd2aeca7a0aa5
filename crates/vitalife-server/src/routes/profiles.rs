//! Saved profile routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use vitalife_core::UserProfile;

use super::{api_error, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions/{sid}/profiles", get(list_profiles))
        .route(
            "/sessions/{sid}/profiles/{uid}",
            get(load_profile).put(save_profile).delete(delete_profile),
        )
}

async fn list_profiles(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<String>,
) -> ApiResult {
    let session = state.session(&sid).map_err(api_error)?;
    let session = session.lock();
    let profiles: Vec<serde_json::Value> = session
        .list_profiles()
        .into_iter()
        .map(|(user_id, profile)| {
            serde_json::json!({
                "userId": user_id,
                "profile": profile,
                "bmi": profile.bmi(),
            })
        })
        .collect();
    Ok(Json(serde_json::json!({
        "count": profiles.len(),
        "profiles": profiles,
    })))
}

async fn load_profile(
    State(state): State<Arc<AppState>>,
    Path((sid, uid)): Path<(String, String)>,
) -> ApiResult {
    let session = state.session(&sid).map_err(api_error)?;
    let session = session.lock();
    let profile = session.load_profile(&uid).map_err(api_error)?;
    Ok(Json(serde_json::json!({
        "userId": uid,
        "profile": profile,
        "bmi": profile.bmi(),
    })))
}

/// PUT /api/sessions/{sid}/profiles/{uid} — replaces any saved profile.
async fn save_profile(
    State(state): State<Arc<AppState>>,
    Path((sid, uid)): Path<(String, String)>,
    Json(profile): Json<UserProfile>,
) -> ApiResult {
    let session = state.session(&sid).map_err(api_error)?;
    let mut session = session.lock();
    let saved = session.save_profile(&uid, profile).map_err(api_error)?;
    Ok(Json(serde_json::json!({
        "success": true,
        "userId": uid,
        "profile": saved,
    })))
}

async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Path((sid, uid)): Path<(String, String)>,
) -> ApiResult {
    let session = state.session(&sid).map_err(api_error)?;
    session.lock().delete_profile(&uid).map_err(api_error)?;
    Ok(Json(serde_json::json!({ "success": true, "userId": uid })))
}
