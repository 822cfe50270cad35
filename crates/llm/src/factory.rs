//! Completion client factory.
//!
//! Builds the gateway client once at process start from configuration.
//! The resulting `Arc<dyn CompletionClient>` is passed by handle into the
//! request pipeline; there is no global client state.

use std::sync::Arc;

use comply_core::{AppError, AppResult};

use crate::client::{CompletionClient, ModelSettings};
use crate::providers::OpenAiClient;

/// Create a completion client for the configured provider.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai" or "custom")
/// * `endpoint` - Optional endpoint URL (required for "custom")
/// * `api_key` - API key (required for "openai")
/// * `settings` - Model configuration value object
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
    settings: ModelSettings,
) -> AppResult<Arc<dyn CompletionClient>> {
    match provider.to_lowercase().as_str() {
        "openai" => {
            let api_key = api_key.ok_or_else(|| {
                AppError::Config("OpenAI provider requires an API key".to_string())
            })?;

            let client = match endpoint {
                Some(endpoint) => OpenAiClient::with_base_url(endpoint, api_key, settings)?,
                None => OpenAiClient::new(api_key, settings)?,
            };

            Ok(Arc::new(client))
        }
        "custom" => {
            let endpoint = endpoint.ok_or_else(|| {
                AppError::Config("Custom provider requires an endpoint URL".to_string())
            })?;

            let client =
                OpenAiClient::with_base_url(endpoint, api_key.unwrap_or(""), settings)?;
            Ok(Arc::new(client))
        }
        _ => Err(AppError::Config(format!("Unknown provider: {}", provider))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings() -> ModelSettings {
        ModelSettings {
            model: "gpt-4".to_string(),
            max_tokens: 1500,
            temperature: 0.1,
            timeout: Duration::from_secs(30),
        }
    }

    #[test]
    fn creates_openai_client() {
        let client = create_client("openai", None, Some("sk-test"), settings());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().provider_name(), "openai");
    }

    #[test]
    fn openai_requires_api_key() {
        match create_client("openai", None, None, settings()) {
            Err(AppError::Config(msg)) => assert!(msg.contains("requires an API key")),
            other => panic!("expected config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn custom_requires_endpoint() {
        match create_client("custom", None, None, settings()) {
            Err(AppError::Config(msg)) => assert!(msg.contains("requires an endpoint")),
            other => panic!("expected config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn custom_endpoint_without_key_is_allowed() {
        let client = create_client("custom", Some("http://localhost:8080"), None, settings());
        assert!(client.is_ok());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        match create_client("mystery", None, None, settings()) {
            Err(AppError::Config(msg)) => assert!(msg.contains("Unknown provider")),
            other => panic!("expected config error, got {:?}", other.map(|_| ())),
        }
    }
}
