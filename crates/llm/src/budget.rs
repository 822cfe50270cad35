//! Prompt token budget.
//!
//! Token counts are estimated with the rule of thumb that one token is
//! roughly four characters. Prompt pairs over budget are rejected before
//! any network call is made.

/// Maximum estimated input tokens per completion.
///
/// Leaves room for the response within the model's context window.
pub const MAX_INPUT_TOKENS: usize = 6000;

/// Estimate the number of tokens in a text string.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// Check that the combined prompt pair fits the input token budget.
pub fn fits_budget(system: &str, user: &str) -> bool {
    let total = (system.chars().count() + user.chars().count()) / 4;

    if total > MAX_INPUT_TOKENS {
        tracing::warn!(
            estimated_tokens = total,
            max_tokens = MAX_INPUT_TOKENS,
            "prompt over token budget"
        );
        return false;
    }

    true
}
