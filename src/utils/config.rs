//! Environment-based configuration.
//!
//! Everything is read once at startup; missing values fall back to local
//! defaults and malformed values fail fast instead of surfacing mid-request.

use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Database settings
    pub database: DatabaseConfig,
    /// Model settings
    pub llm: LlmConfig,
    /// Chat pipeline settings
    pub chat: ChatConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// Database settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file; `None` or `:memory:` selects the ephemeral
    /// in-memory store
    pub path: Option<String>,
}

/// Model settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Which provider to use: "ollama" or "openai"
    pub provider: String,
    /// Ollama server URL
    pub ollama_url: String,
    /// Ollama model tag
    pub ollama_model: String,
    /// OpenAI API key (required when provider is "openai")
    pub openai_api_key: Option<String>,
    /// OpenAI API base URL
    pub openai_api_base: String,
    /// OpenAI model name
    pub openai_model: String,
    /// Completion token cap
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Concurrent generations allowed against the model
    pub max_concurrent: usize,
    /// Seconds a request may wait for a generation slot
    pub acquire_timeout_secs: u64,
}

/// Chat pipeline settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Default history size returned by the history endpoint
    pub history_limit: usize,
    /// Number of recent turns included in the prompt
    pub prompt_window: usize,
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Internal(format!("Invalid value for {}: {}", name, raw))),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Build the configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_var("PORT", 3000)?,
            },
            database: DatabaseConfig {
                path: env::var("DATABASE_PATH").ok().filter(|p| !p.is_empty()),
            },
            llm: LlmConfig {
                provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "ollama".to_string()),
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "mistral".to_string()),
                openai_api_key: env::var("OPENAI_API_KEY").ok(),
                openai_api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                openai_model: env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
                max_tokens: parse_var("LLM_MAX_TOKENS", 150)?,
                temperature: parse_var("LLM_TEMPERATURE", 0.4)?,
                max_concurrent: parse_var("LLM_MAX_CONCURRENT", 1)?,
                acquire_timeout_secs: parse_var("LLM_ACQUIRE_TIMEOUT_SECS", 30)?,
            },
            chat: ChatConfig {
                history_limit: parse_var("CHAT_HISTORY_LIMIT", 20)?,
                prompt_window: parse_var("CHAT_PROMPT_WINDOW", 6)?,
            },
        })
    }

    /// A configuration suitable for tests: in-memory store, tiny windows.
    pub fn for_tests() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig { path: None },
            llm: LlmConfig {
                provider: "ollama".to_string(),
                ollama_url: "http://localhost:11434".to_string(),
                ollama_model: "mistral".to_string(),
                openai_api_key: None,
                openai_api_base: "https://api.openai.com/v1".to_string(),
                openai_model: "gpt-4o-mini".to_string(),
                max_tokens: 150,
                temperature: 0.4,
                max_concurrent: 1,
                acquire_timeout_secs: 5,
            },
            chat: ChatConfig {
                history_limit: 20,
                prompt_window: 6,
            },
        }
    }
}
