//! Prompt system for the ComplyBot service.
//!
//! This crate turns a sanitized question plus ranked compliance records
//! into the system and user prompts sent to the completion gateway:
//! - question intent classification (GDPR / SOC 2 / HIPAA / general)
//! - context summarization with fixed fallbacks for missing fields
//! - fixed per-regime templates rendered with Handlebars

pub mod builder;
pub mod classifier;
pub mod templates;
pub mod types;

// Re-export main types
pub use builder::{build_prompt, summarize_context};
pub use classifier::classify;
pub use templates::SYSTEM_PROMPT;
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptTemplate, QuestionType};
