//! HTTP route handlers.

pub mod analytics;
pub mod chat;
pub mod info;
pub mod profiles;
pub mod sessions;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use vitalife_core::Error;

use crate::state::AppState;

/// Handler result: JSON body, or a status code with `{error}`.
pub type ApiResult = Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)>;

/// Map a library error onto an HTTP status with an `{error}` body.
pub fn api_error(err: Error) -> (StatusCode, Json<serde_json::Value>) {
    let status = match &err {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::InvalidInput(_) | Error::InvalidProfile(_) => StatusCode::BAD_REQUEST,
        _ => {
            tracing::error!("request failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(info::routes())
        .merge(sessions::routes())
        .merge(chat::routes())
        .merge(profiles::routes())
        .merge(analytics::routes())
}
