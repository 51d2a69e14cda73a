//! Core types (requests, responses, errors).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= API Request/Response Types =============

/// A patient message addressed to the assistant.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Identifier the caller uses for this patient
    pub user_id: String,
    /// Free-text patient message
    pub message: String,
}

/// The assistant's reply to one chat message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    /// Reply text (canned for emergencies, model-generated otherwise)
    pub reply: String,
    /// Memory after this message; omitted on the emergency path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<PatientMemory>,
    /// True when an emergency keyword bypassed generation
    #[serde(default)]
    pub emergency: bool,
}

/// Request body for the chat history endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryRequest {
    /// Identifier the caller uses for this patient
    pub user_id: String,
    /// Maximum number of messages to return (default 20)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Chat history for one patient, oldest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    /// Identifier the caller uses for this patient
    pub user_id: String,
    /// Number of entries returned
    pub count: usize,
    /// Messages, oldest first
    pub history: Vec<HistoryEntry>,
}

/// One persisted chat message as returned by the history endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    /// "user" or "assistant"
    pub role: String,
    /// Message text
    pub message: String,
    /// RFC3339 timestamp
    pub time: String,
}

// ============= Domain Types =============

/// A stored chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who said it
    pub role: MessageRole,
    /// Message text
    pub content: String,
    /// When it was said
    pub timestamp: DateTime<Utc>,
}

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The patient
    User,
    /// The assistant
    Assistant,
}

impl MessageRole {
    /// Stable string form used in the database and API bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Per-patient symptom memory, persisted as one JSON blob per user id.
///
/// `symptoms` keeps insertion order and never holds duplicates; entries come
/// from a fixed vocabulary, so the set stays small.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PatientMemory {
    /// Symptoms mentioned so far, in first-mention order
    pub symptoms: Vec<String>,
    /// How long the complaint has lasted, when stated
    pub duration: Option<String>,
    /// Stated severity, when given
    pub severity: Option<String>,
}

impl PatientMemory {
    /// Forget everything; used when the patient reports recovery.
    pub fn reset(&mut self) {
        self.symptoms.clear();
        self.duration = None;
        self.severity = None;
    }
}

// ============= Error Types =============

/// Application error, converted to a JSON body at the response boundary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database failure
    #[error("Database error: {0}")]
    Database(String),

    /// Model load or generation failure
    #[error("LLM error: {0}")]
    Llm(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or missing request fields
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Database(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Llm(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_reset_clears_everything() {
        let mut memory = PatientMemory {
            symptoms: vec!["fever".to_string(), "cough".to_string()],
            duration: Some("since yesterday".to_string()),
            severity: Some("mild".to_string()),
        };

        memory.reset();

        assert!(memory.symptoms.is_empty());
        assert!(memory.duration.is_none());
        assert!(memory.severity.is_none());
    }

    #[test]
    fn memory_serializes_round_trip() {
        let memory = PatientMemory {
            symptoms: vec!["headache".to_string()],
            duration: Some("today".to_string()),
            severity: None,
        };

        let json = serde_json::to_string(&memory).unwrap();
        let back: PatientMemory = serde_json::from_str(&json).unwrap();

        assert_eq!(memory, back);
    }

    #[test]
    fn role_strings_match_wire_format() {
        assert_eq!(MessageRole::User.as_str(), "user");
        assert_eq!(MessageRole::Assistant.as_str(), "assistant");
    }
}
