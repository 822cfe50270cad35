//! The answer pipeline.
//!
//! Orchestrates sanitize → rank → build prompt → gateway call and maps
//! every outcome to a structured result. Input validation and the token
//! budget run before any outbound call; gateway failures convert to safe
//! fallback answers and are never surfaced raw.

use std::sync::Arc;

use serde::Serialize;

use comply_knowledge::{rank, ComplianceRecord, ComplianceStore};
use comply_llm::{fits_budget, CompletionClient, CompletionRequest, GatewayError};
use comply_prompt::build_prompt;
use comply_sanitizer::{is_safe, sanitize};

/// Fixed local answer when the ranker finds nothing relevant.
///
/// Also covers the degraded mode where the dataset failed to load.
pub const NO_DATA_ANSWER: &str = "I could not find relevant information in the current compliance dataset. Please consult the compliance officer for assistance with this specific question.";

const EMPTY_QUESTION_MESSAGE: &str = "Invalid or empty question";
const UNSAFE_QUESTION_MESSAGE: &str = "Question contains unsafe content or is too long";
const PROMPT_TOO_LONG_MESSAGE: &str =
    "Question is too complex. Please try breaking it into smaller, more specific questions.";
const INTERNAL_ERROR_MESSAGE: &str =
    "An internal error occurred while processing your question. Please try again later.";

/// Machine-readable error codes for failed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_input")]
    InvalidInput,

    #[serde(rename = "prompt_too_long")]
    PromptTooLong,

    #[serde(rename = "rate_limit_exceeded")]
    RateLimited,

    #[serde(rename = "authentication_failed")]
    AuthFailed,

    #[serde(rename = "api_error")]
    ApiError,

    #[serde(rename = "unexpected_error")]
    Unexpected,
}

impl ErrorCode {
    /// Whether the failure is the caller's fault (HTTP 400) rather than a
    /// downstream one (HTTP 500).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput | Self::PromptTooLong)
    }
}

impl From<&GatewayError> for ErrorCode {
    fn from(err: &GatewayError) -> Self {
        match err {
            GatewayError::RateLimited(_) => Self::RateLimited,
            GatewayError::AuthFailed(_) => Self::AuthFailed,
            GatewayError::ApiError(_) => Self::ApiError,
            GatewayError::Unexpected(_) => Self::Unexpected,
        }
    }
}

/// A successfully answered question.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerSuccess {
    /// The answer text
    pub answer: String,

    /// Present when the gateway produced the answer; absent for the local
    /// no-data fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AnswerMetadata>,
}

/// Metadata about a gateway-produced answer.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerMetadata {
    /// Number of records that informed the prompt
    #[serde(rename = "sourceCount")]
    pub source_count: usize,

    /// Total tokens the completion consumed
    #[serde(rename = "tokensUsed")]
    pub tokens_used: u32,

    /// Model that produced the answer
    pub model: String,
}

/// A failed answer with a user-safe message.
#[derive(Debug, Clone)]
pub struct AnswerFailure {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable, user-safe message
    pub message: String,

    /// Fallback answer text for gateway failures
    pub answer: Option<String>,
}

impl AnswerFailure {
    fn invalid_input(message: &str) -> Self {
        Self {
            code: ErrorCode::InvalidInput,
            message: message.to_string(),
            answer: None,
        }
    }
}

/// The request pipeline: sanitize → rank → build prompt → complete.
///
/// Holds its collaborators by handle; the store and client are constructed
/// once at startup and shared across requests.
pub struct AnswerService {
    store: Arc<ComplianceStore>,
    client: Arc<dyn CompletionClient>,
}

impl AnswerService {
    /// Create the pipeline over an explicit store and gateway client.
    pub fn new(store: Arc<ComplianceStore>, client: Arc<dyn CompletionClient>) -> Self {
        Self { store, client }
    }

    /// Answer a raw compliance question.
    pub async fn answer(&self, raw_question: &str) -> Result<AnswerSuccess, AnswerFailure> {
        // Sanitize and validate before anything leaves the process
        let question = sanitize(raw_question);

        if question.is_empty() {
            return Err(AnswerFailure::invalid_input(EMPTY_QUESTION_MESSAGE));
        }

        if !is_safe(&question) {
            return Err(AnswerFailure::invalid_input(UNSAFE_QUESTION_MESSAGE));
        }

        tracing::info!(
            question = %preview(&question),
            "processing compliance question"
        );

        // Rank against the current dataset snapshot
        let snapshot = self.store.snapshot();
        let matches = rank(&question, &snapshot);

        if matches.is_empty() {
            tracing::warn!("no relevant compliance data found for question");
            return Ok(AnswerSuccess {
                answer: NO_DATA_ANSWER.to_string(),
                metadata: None,
            });
        }

        let records: Vec<ComplianceRecord> =
            matches.into_iter().map(|scored| scored.record).collect();

        // Build the regime-specific prompt
        let built = build_prompt(&question, &records, None).map_err(|e| {
            tracing::error!(error = %e, "prompt rendering failed");
            AnswerFailure {
                code: ErrorCode::Unexpected,
                message: INTERNAL_ERROR_MESSAGE.to_string(),
                answer: None,
            }
        })?;

        // Enforce the token budget before calling out
        if !fits_budget(&built.system, &built.user) {
            return Err(AnswerFailure {
                code: ErrorCode::PromptTooLong,
                message: PROMPT_TOO_LONG_MESSAGE.to_string(),
                answer: None,
            });
        }

        let request = CompletionRequest::new(built.system.as_str(), built.user.as_str());

        match self.client.complete(&request).await {
            Ok(response) => {
                tracing::info!(
                    tokens_used = response.usage.total_tokens,
                    sources = records.len(),
                    "successfully generated answer"
                );

                Ok(AnswerSuccess {
                    answer: response.content,
                    metadata: Some(AnswerMetadata {
                        source_count: records.len(),
                        tokens_used: response.usage.total_tokens,
                        model: response.model,
                    }),
                })
            }
            Err(e) => {
                tracing::error!(error = %e, code = e.code(), "gateway error");

                Err(AnswerFailure {
                    code: ErrorCode::from(&e),
                    message: e.fallback_answer().to_string(),
                    answer: Some(e.fallback_answer().to_string()),
                })
            }
        }
    }
}

/// First 100 characters of the question, for logging.
fn preview(question: &str) -> String {
    question.chars().take(100).collect()
}
