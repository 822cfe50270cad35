//! Gateway failure taxonomy.
//!
//! Every failure of the external completion call maps to one of these
//! variants. The `Display` text (with provider detail) is for logs only;
//! callers surface `fallback_answer()` and `code()` instead, so raw
//! provider error bodies never reach users.

use thiserror::Error;

/// Failure kinds of the completion gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Provider rate limit hit (HTTP 429)
    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    /// Invalid or missing credentials (HTTP 401/403)
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Any other provider-reported error
    #[error("API error: {0}")]
    ApiError(String),

    /// Transport, decode, or otherwise unclassified failures
    #[error("unexpected gateway error: {0}")]
    Unexpected(String),
}

impl GatewayError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RateLimited(_) => "rate_limit_exceeded",
            Self::AuthFailed(_) => "authentication_failed",
            Self::ApiError(_) => "api_error",
            Self::Unexpected(_) => "unexpected_error",
        }
    }

    /// Fixed user-safe answer text for this failure kind.
    pub fn fallback_answer(&self) -> &'static str {
        match self {
            Self::RateLimited(_) => {
                "I'm currently experiencing high demand. Please try again in a moment."
            }
            Self::AuthFailed(_) => "Authentication error. Please check the API configuration.",
            Self::ApiError(_) => {
                "I'm experiencing technical difficulties. Please try again later."
            }
            Self::Unexpected(_) => {
                "An unexpected error occurred. Please consult the compliance officer."
            }
        }
    }
}
