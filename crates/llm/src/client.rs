//! Completion client abstraction and request/response types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use comply_core::config::LlmConfig;

use crate::error::GatewayError;

/// A completion request: the system instruction plus the rendered user
/// prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System prompt defining the assistant's role
    pub system: String,

    /// User prompt (question with context)
    pub user: String,
}

impl CompletionRequest {
    /// Create a new completion request.
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Token usage statistics reported by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: u32,

    /// Total tokens used
    #[serde(default)]
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Create usage stats from prompt and completion token counts.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// A completed gateway response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated answer text
    pub content: String,

    /// Model that generated the response
    pub model: String,

    /// Usage statistics
    pub usage: TokenUsage,
}

/// Explicit model configuration value object.
///
/// Model name, token limit, temperature, and the outbound timeout are
/// configuration passed into the client at construction, not hidden
/// instance state.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    /// Model identifier (e.g., "gpt-4")
    pub model: String,

    /// Maximum tokens to generate per completion
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Outbound request timeout
    pub timeout: Duration,
}

impl From<&LlmConfig> for ModelSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Trait for completion gateway providers.
///
/// Abstracts the hosted language-model API behind a unified interface so
/// the pipeline can be tested with a mock client and providers can be
/// swapped by configuration.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Get the provider name (e.g., "openai").
    fn provider_name(&self) -> &str;

    /// The model settings this client was constructed with.
    fn settings(&self) -> &ModelSettings;

    /// Perform a completion.
    ///
    /// The implementation applies the configured timeout and performs no
    /// retries; failures map onto the [`GatewayError`] taxonomy.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError>;

    /// Cheap reachability check for startup and health reporting.
    async fn probe(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_totals() {
        let usage = TokenUsage::new(120, 80);
        assert_eq!(usage.total_tokens, 200);
    }

    #[test]
    fn settings_from_config() {
        let config = LlmConfig::default();
        let settings = ModelSettings::from(&config);
        assert_eq!(settings.model, "gpt-4");
        assert_eq!(settings.max_tokens, 1500);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }
}
