//! HTTP API handlers and routes.
//!
//! The REST surface, built on the Axum web framework.
//!
//! # API Endpoints
//!
//! - `POST /api/chat` - Send a patient message, receive the reply and memory
//! - `POST /api/chat/history` - Recent chat history for a patient
//! - `GET /api/memory/{user_id}` - Current patient memory
//! - `POST /api/clear/{user_id}` - Wipe a patient's memory and history
//! - `GET /api/health` - Health check endpoint
//!
//! # OpenAPI Documentation
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use utoipa::OpenApi;

/// OpenAPI document for the API surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::chat::chat,
        handlers::history::history,
        handlers::memory::get_memory,
        handlers::memory::clear_user,
        handlers::health::health,
    ),
    components(schemas(
        crate::types::ChatRequest,
        crate::types::ChatResponse,
        crate::types::HistoryRequest,
        crate::types::HistoryResponse,
        crate::types::HistoryEntry,
        crate::types::PatientMemory,
    )),
    tags(
        (name = "chat", description = "Patient chat"),
        (name = "memory", description = "Patient memory"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
