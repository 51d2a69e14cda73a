//! LLM provider clients and abstractions.
//!
//! A unified interface over the supported model backends. The chat pipeline
//! makes exactly one generation call per request; providers implement
//! [`LLMClient`] and are selected at startup via [`Provider`].
//!
//! Enable providers via Cargo features:
//! - `ollama` (default) - local inference through an Ollama server
//! - `openai` - OpenAI API and compatible endpoints

/// Core LLM client trait and provider selection.
pub mod client;
/// Concurrency gate serializing access to the loaded model.
pub mod gate;

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "openai")]
pub mod openai;

pub use client::{GenerationParams, LLMClient, LLMClientFactory, Provider};
pub use gate::GenerationGate;
