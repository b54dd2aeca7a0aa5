//! Engine status, knowledge table, example prompts, normalization.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use vitalife_triage::EXAMPLE_PROMPTS;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(get_status))
        .route("/conditions", get(list_conditions))
        .route("/examples", get(list_examples))
        .route("/normalize", post(normalize))
}

#[derive(serde::Deserialize)]
struct TextInput {
    text: String,
}

/// GET /api/status — engine summary plus live session count.
async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let status = state.engine.status();
    Json(serde_json::json!({
        "conditions": status.conditions,
        "conditionNames": status.condition_names,
        "normalizationRules": status.normalization_rules,
        "lemmatizer": status.lemmatizer,
        "lemmatizerAvailable": status.lemmatizer_available,
        "sessions": state.sessions.count(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn list_conditions(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let records = state.engine.knowledge().records();
    Json(serde_json::json!({
        "conditions": records,
        "count": records.len(),
    }))
}

async fn list_examples() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "examples": EXAMPLE_PROMPTS }))
}

/// POST /api/normalize — canonical phrase for free text.
async fn normalize(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TextInput>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "text": input.text,
        "normalized": state.engine.normalize(&input.text),
    }))
}
