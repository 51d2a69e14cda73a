//! The chat pipeline handler.

use crate::{
    AppState, memory,
    memory::RecentWindow,
    prompt, triage,
    types::{AppError, ChatRequest, ChatResponse, MessageRole, Result},
};
use axum::{Json, extract::State};

/// Canned reply when an emergency keyword is detected.
pub const EMERGENCY_REPLY: &str = "This may be serious. Please visit the hospital immediately.";

const HOW_ARE_YOU_REPLY: &str = "I'm doing well. How are you feeling today?";
const GREETING_REPLY: &str = "Hello! How can I help you today?";

/// Chat with the hospital assistant.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Invalid input"),
        (status = 500, description = "Generation or storage failure")
    ),
    tag = "chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let user_id = payload.user_id.trim();
    let message = payload.message.trim();

    if user_id.is_empty() {
        return Err(AppError::InvalidInput("user_id is required".to_string()));
    }
    if message.is_empty() {
        return Err(AppError::InvalidInput("message is required".to_string()));
    }

    let mut patient_memory = state.store.load_memory(user_id).await?;

    // Snapshot the prompt window before this message lands in history, so
    // the template's own "Patient:" line is the only copy of it.
    let recent = state
        .store
        .recent_history(user_id, state.config.chat.prompt_window)
        .await?;

    state
        .store
        .append_message(user_id, MessageRole::User, message)
        .await?;

    memory::update(&mut patient_memory, message);
    state.store.save_memory(user_id, &patient_memory).await?;

    if triage::is_emergency(message) {
        tracing::warn!(user_id, "emergency keyword detected, bypassing generation");
        return respond(&state, user_id, EMERGENCY_REPLY.to_string(), None, true).await;
    }

    if triage::is_how_are_you(message) {
        return respond(
            &state,
            user_id,
            HOW_ARE_YOU_REPLY.to_string(),
            Some(patient_memory),
            false,
        )
        .await;
    }

    // Greetings short-circuit only when the message carried no clinical
    // content; "hi, I have a fever" must reach the model.
    if triage::is_greeting(message)
        && triage::detect_symptoms(message).is_empty()
        && !triage::is_recovered(message)
    {
        return respond(
            &state,
            user_id,
            GREETING_REPLY.to_string(),
            Some(patient_memory),
            false,
        )
        .await;
    }

    if let Some(note) = triage::assess(&patient_memory.symptoms) {
        tracing::warn!(user_id, "symptom combination escalation");
        let reply = format!("{note}. Please visit the hospital.");
        return respond(&state, user_id, reply, Some(patient_memory), false).await;
    }

    let window = RecentWindow::from_history(state.config.chat.prompt_window, recent);
    let full_prompt = prompt::build(message, &patient_memory, &window);

    let raw = {
        let _permit = state.gate.acquire().await?;
        state.llm.generate(&full_prompt).await?
    };

    let reply = prompt::with_empathy(&prompt::sanitize(&raw));

    tracing::info!(user_id, model = state.llm.model_name(), "reply generated");
    respond(&state, user_id, reply, Some(patient_memory), false).await
}

/// Persist the assistant reply and build the response body.
async fn respond(
    state: &AppState,
    user_id: &str,
    reply: String,
    memory: Option<crate::types::PatientMemory>,
    emergency: bool,
) -> Result<Json<ChatResponse>> {
    state
        .store
        .append_message(user_id, MessageRole::Assistant, &reply)
        .await?;

    Ok(Json(ChatResponse {
        reply,
        memory,
        emergency,
    }))
}
