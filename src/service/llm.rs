//! Shared LLM client and interaction utilities
//!
//! Provides a common interface for OpenAI chat-completion calls.

use async_trait::async_trait;
use rig::completion::Prompt;
use rig::providers::openai;

use crate::model::config::LlmConfig;

/// Error type for LLM calls
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LlmError {
    #[error("Completion request failed: {0}")]
    RequestFailed(String),
}

/// Text generation backend used by the report service
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Identifier of the model behind this generator
    fn model(&self) -> &str;

    /// Run one chat completion with a system preamble and a single user message
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError>;
}

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
    model: String,
    temperature: f64,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key and model settings
    pub fn new(api_key: &str, config: &LlmConfig) -> Self {
        let client = match config.base_url.as_deref() {
            Some(base_url) => openai::Client::from_url(api_key, base_url),
            None => openai::Client::new(api_key),
        };

        Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let agent = self
            .client
            .agent(&self.model)
            .preamble(system_prompt)
            .temperature(self.temperature)
            .build();

        agent
            .prompt(user_prompt)
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))
    }
}
