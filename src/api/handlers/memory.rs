//! Patient memory handlers.

use crate::{
    AppState,
    types::{PatientMemory, Result},
};
use axum::{
    Json,
    extract::{Path, State},
};

/// Current memory record for a patient.
///
/// Returns an empty record for unknown patients, matching what the chat
/// pipeline would start from.
#[utoipa::path(
    get,
    path = "/api/memory/{user_id}",
    params(
        ("user_id" = String, Path, description = "Patient identifier")
    ),
    responses(
        (status = 200, description = "Patient memory", body = PatientMemory)
    ),
    tag = "memory"
)]
pub async fn get_memory(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PatientMemory>> {
    let memory = state.store.load_memory(&user_id).await?;
    Ok(Json(memory))
}

/// Wipe a patient's memory and chat history.
#[utoipa::path(
    post,
    path = "/api/clear/{user_id}",
    params(
        ("user_id" = String, Path, description = "Patient identifier")
    ),
    responses(
        (status = 200, description = "Cleared")
    ),
    tag = "memory"
)]
pub async fn clear_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    state.store.clear_user(&user_id).await?;
    tracing::info!(user_id, "patient record cleared");

    Ok(Json(serde_json::json!({ "cleared": true })))
}
