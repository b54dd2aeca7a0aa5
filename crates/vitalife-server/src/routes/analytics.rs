//! Session analytics route.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use vitalife_session::Analytics;

use super::{api_error, ApiResult};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/sessions/{sid}/analytics", get(get_analytics))
}

async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Path(sid): Path<String>,
) -> ApiResult {
    let session = state.session(&sid).map_err(api_error)?;
    let analytics = Analytics::from_session(
        &session.lock(),
        state.engine.knowledge(),
        state.engine.status(),
    );
    Ok(Json(serde_json::to_value(analytics).map_err(|e| api_error(e.into()))?))
}
