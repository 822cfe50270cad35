//! OpenAI-compatible chat-completions provider.
//!
//! Sends the system and user prompts to `{base}/v1/chat/completions` and
//! maps HTTP failures onto the gateway error taxonomy. Any endpoint that
//! speaks the OpenAI wire format works through this client.

use serde::{Deserialize, Serialize};

use comply_core::{AppError, AppResult};

use crate::client::{
    CompletionClient, CompletionRequest, CompletionResponse, ModelSettings, TokenUsage,
};
use crate::error::GatewayError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Chat-completions API request format.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat-completions API response format.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

/// OpenAI-compatible completion client.
pub struct OpenAiClient {
    /// Base URL for the API
    base_url: String,

    /// API key; empty disables the Authorization header
    api_key: String,

    /// Model configuration
    settings: ModelSettings,

    /// HTTP client with the configured request timeout
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client against the hosted OpenAI API.
    pub fn new(api_key: impl Into<String>, settings: ModelSettings) -> AppResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, settings)
    }

    /// Create a client against a custom OpenAI-compatible endpoint.
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        settings: ModelSettings,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AppError::Gateway(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            settings,
            client,
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    /// Attach the bearer token when a key is configured.
    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            request
        } else {
            request.header("Authorization", format!("Bearer {}", self.api_key))
        }
    }

    async fn send_chat(
        &self,
        body: &ChatRequest<'_>,
    ) -> Result<ChatResponse, GatewayError> {
        let response = self
            .apply_auth(self.client.post(self.chat_url()))
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Unexpected(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "no response body".to_string());

            return Err(match status.as_u16() {
                429 => GatewayError::RateLimited(detail),
                401 | 403 => GatewayError::AuthFailed(detail),
                _ => GatewayError::ApiError(format!("status {}: {}", status, detail)),
            });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| GatewayError::Unexpected(format!("failed to parse response: {}", e)))
    }
}

#[async_trait::async_trait]
impl CompletionClient for OpenAiClient {
    fn provider_name(&self) -> &str {
        "openai"
    }

    fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, GatewayError> {
        tracing::info!(
            prompt_chars = request.user.chars().count(),
            model = %self.settings.model,
            "sending completion request"
        );

        let body = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let chat = self.send_chat(&body).await?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::Unexpected("response contained no choices".to_string()))?;

        let usage = chat
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        tracing::info!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "completion succeeded"
        );

        Ok(CompletionResponse {
            content,
            model: chat.model.unwrap_or_else(|| self.settings.model.clone()),
            usage,
        })
    }

    async fn probe(&self) -> bool {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: "Test connection",
            }],
            max_tokens: 10,
            temperature: 0.0,
        };

        match self.send_chat(&body).await {
            Ok(_) => {
                tracing::info!("gateway connection test successful");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "gateway connection test failed");
                false
            }
        }
    }
}
