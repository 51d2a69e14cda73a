//! # Ward - Hospital Virtual Assistant Server
//!
//! A conversational hospital assistant: free-text patient messages go
//! through keyword triage and a small per-patient symptom memory before a
//! templated prompt is forwarded to a locally hosted language model.
//! Emergency keywords bypass generation entirely with a canned safety reply.
//!
//! ## Overview
//!
//! Ward can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `ward-server` binary
//! 2. **As a library** - Import components into your own Rust project
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use ward::llm::{LLMClientFactory, Provider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Provider::Ollama {
//!         base_url: "http://localhost:11434".to_string(),
//!         model: "mistral".to_string(),
//!     };
//!
//!     let client = provider.create_client().await?;
//!     let response = client.generate("Hello, world!").await?;
//!     println!("{}", response);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ollama` | Ollama local inference (default) |
//! | `openai` | OpenAI API support |
//! | `local-db` | Local SQLite database (default) |
//! | `turso` | Remote Turso database |
//! | `swagger-ui` | Interactive API documentation |
//!
//! ## Pipeline
//!
//! request → load memory → snapshot prompt window → persist user message →
//! update memory → persist memory → emergency check (canned reply on hit) →
//! build prompt → generate → sanitize → persist assistant message → respond.

#![warn(missing_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Command-line interface.
pub mod cli;
/// Persistence (patient memory, chat history).
pub mod db;
/// LLM provider clients and abstractions.
pub mod llm;
/// Patient memory updates and the prompt window.
pub mod memory;
/// Prompt assembly and output sanitization.
pub mod prompt;
/// Rule-based message triage.
pub mod triage;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use db::{ChatStore, DatabaseProvider, SqliteClient};
pub use llm::{GenerationGate, LLMClient, LLMClientFactory, Provider};
pub use types::{AppError, PatientMemory, Result};
pub use utils::config::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// Chat persistence backend
    pub store: Arc<dyn ChatStore>,
    /// The loaded model client
    pub llm: Arc<dyn LLMClient>,
    /// Serializes generations against the model
    pub gate: Arc<GenerationGate>,
}
