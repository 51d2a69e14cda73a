//! Health check handler.

use crate::AppState;
use axum::{Json, extract::State};

/// Service health and the configured model.
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up")
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "model": state.llm.model_name(),
    }))
}
