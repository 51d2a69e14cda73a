//! LLM client abstraction and provider selection.

use crate::types::Result;
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction.
///
/// All providers implement this trait, allowing for easy swapping between
/// providers without changing the chat pipeline.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate with a separate system prompt.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Generate with conversation history as (role, content) pairs.
    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String>;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}

/// Generation knobs passed to providers that accept them.
///
/// The defaults mirror the assistant's tuning: short replies, low
/// temperature.
#[derive(Debug, Clone, Copy)]
pub struct GenerationParams {
    /// Completion token cap
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 150,
            temperature: 0.4,
        }
    }
}

/// Provider enum for runtime selection.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Ollama local LLM provider
    #[cfg(feature = "ollama")]
    Ollama {
        /// Base URL of the Ollama server, e.g. `http://localhost:11434`
        base_url: String,
        /// Model tag to run, e.g. `mistral`
        model: String,
    },

    /// OpenAI API provider (including compatible endpoints)
    #[cfg(feature = "openai")]
    OpenAI {
        /// API key
        api_key: String,
        /// API base URL
        api_base: String,
        /// Model name
        model: String,
        /// Generation knobs
        params: GenerationParams,
    },
}

impl Provider {
    /// Create a client instance for this provider.
    pub async fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        match self {
            #[cfg(feature = "ollama")]
            Provider::Ollama { base_url, model } => Ok(Box::new(
                super::ollama::OllamaClient::new(base_url.clone(), model.clone()).await?,
            )),

            #[cfg(feature = "openai")]
            Provider::OpenAI {
                api_key,
                api_base,
                model,
                params,
            } => Ok(Box::new(super::openai::OpenAIClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
                *params,
            ))),
        }
    }

    /// Get a human-readable name for this provider.
    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "ollama")]
            Provider::Ollama { .. } => "Ollama",
            #[cfg(feature = "openai")]
            Provider::OpenAI { .. } => "OpenAI",
        }
    }
}

/// Client factory holding the configured default provider.
pub struct LLMClientFactory {
    default_provider: Provider,
}

impl LLMClientFactory {
    /// Create a new factory with the specified default provider.
    pub fn new(default_provider: Provider) -> Self {
        Self { default_provider }
    }

    /// Create a client using the default provider.
    pub async fn create_default(&self) -> Result<Box<dyn LLMClient>> {
        self.default_provider.create_client().await
    }

    /// Create a client using a specific provider.
    pub async fn create_with_provider(&self, provider: Provider) -> Result<Box<dyn LLMClient>> {
        provider.create_client().await
    }

    /// Get a reference to the default provider.
    pub fn default_provider(&self) -> &Provider {
        &self.default_provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_match_tuning() {
        let params = GenerationParams::default();
        assert_eq!(params.max_tokens, 150);
        assert!((params.temperature - 0.4).abs() < f32::EPSILON);
    }

    #[cfg(feature = "ollama")]
    #[test]
    fn factory_reports_default_provider() {
        let factory = LLMClientFactory::new(Provider::Ollama {
            base_url: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
        });
        assert_eq!(factory.default_provider().name(), "Ollama");
    }
}
