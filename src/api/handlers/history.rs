//! Chat history handler.

use crate::{
    AppState,
    types::{AppError, HistoryEntry, HistoryRequest, HistoryResponse, Result},
};
use axum::{Json, extract::State};

/// Hard ceiling on requested history size.
const MAX_HISTORY_LIMIT: usize = 200;

/// Recent chat history for a patient, oldest first.
#[utoipa::path(
    post,
    path = "/api/chat/history",
    request_body = HistoryRequest,
    responses(
        (status = 200, description = "Chat history", body = HistoryResponse),
        (status = 400, description = "Invalid input")
    ),
    tag = "chat"
)]
pub async fn history(
    State(state): State<AppState>,
    Json(payload): Json<HistoryRequest>,
) -> Result<Json<HistoryResponse>> {
    let user_id = payload.user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::InvalidInput("user_id is required".to_string()));
    }

    let limit = payload
        .limit
        .unwrap_or(state.config.chat.history_limit)
        .min(MAX_HISTORY_LIMIT);

    let messages = state.store.recent_history(user_id, limit).await?;

    let history: Vec<HistoryEntry> = messages
        .into_iter()
        .map(|m| HistoryEntry {
            role: m.role.as_str().to_string(),
            message: m.content,
            time: m.timestamp.to_rfc3339(),
        })
        .collect();

    Ok(Json(HistoryResponse {
        user_id: user_id.to_string(),
        count: history.len(),
        history,
    }))
}
