//! Completion gateway crate for the ComplyBot service.
//!
//! This crate provides a provider-agnostic abstraction for the outbound
//! AI-completion call. The gateway is an external collaborator: the core
//! pipeline only depends on the `CompletionClient` trait, the token budget
//! check, and the `GatewayError` taxonomy with its fixed user-safe
//! fallback messages.

pub mod budget;
pub mod client;
pub mod error;
pub mod factory;
pub mod providers;

// Re-export main types
pub use budget::{estimate_tokens, fits_budget, MAX_INPUT_TOKENS};
pub use client::{CompletionClient, CompletionRequest, CompletionResponse, ModelSettings, TokenUsage};
pub use error::GatewayError;
pub use factory::create_client;
pub use providers::OpenAiClient;
