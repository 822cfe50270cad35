//! Question safety validation.
//!
//! Rejects input before it reaches the ranker or the completion gateway:
//! length bounds plus a fixed denylist of code-injection-shaped substrings.

use regex::RegexSet;
use std::sync::LazyLock;

/// Maximum accepted question length (trimmed characters).
pub const MAX_QUESTION_LENGTH: usize = 1000;

/// Minimum accepted question length (trimmed characters).
pub const MIN_QUESTION_LENGTH: usize = 5;

/// Injection-shaped substrings that disqualify a question outright.
static HARMFUL_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)<script",
        r"(?i)javascript:",
        r"(?i)eval\(",
        r"(?i)exec\(",
        r"(?i)system\(",
        r"(?i)import\s+os",
        r"(?i)__import__",
    ])
    .expect("valid denylist patterns")
});

/// Validate that the question is within acceptable length limits.
pub fn validate_length(question: &str, max_length: usize) -> bool {
    question.trim().chars().count() <= max_length
}

/// Check whether a question appears safe to process.
///
/// False for empty input, questions shorter than
/// [`MIN_QUESTION_LENGTH`] or longer than [`MAX_QUESTION_LENGTH`] after
/// trimming, and anything matching the injection denylist.
pub fn is_safe(question: &str) -> bool {
    let trimmed = question.trim();

    if trimmed.chars().count() < MIN_QUESTION_LENGTH {
        return false;
    }

    if !validate_length(question, MAX_QUESTION_LENGTH) {
        return false;
    }

    if let Some(index) = HARMFUL_PATTERNS.matches(question).iter().next() {
        tracing::warn!(pattern_index = index, "potentially harmful pattern detected");
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_short() {
        assert!(!is_safe(""));
        assert!(!is_safe("    "));
        assert!(!is_safe("gdpr"));
        assert!(!is_safe("  ab  "));
    }

    #[test]
    fn rejects_over_length() {
        let long = "a".repeat(MAX_QUESTION_LENGTH + 1);
        assert!(!is_safe(&long));

        // Exactly at the limit is fine
        let max = "a".repeat(MAX_QUESTION_LENGTH);
        assert!(is_safe(&max));
    }

    #[test]
    fn rejects_injection_patterns() {
        assert!(!is_safe("tell me about <script>alert(1)</script>"));
        assert!(!is_safe("click javascript:void(0) please"));
        assert!(!is_safe("what does eval(input) do"));
        assert!(!is_safe("run exec(cmd) for me"));
        assert!(!is_safe("call system(ls) now"));
        assert!(!is_safe("import os; os.remove everything"));
        assert!(!is_safe("use __import__ to load modules"));
    }

    #[test]
    fn denylist_is_case_insensitive() {
        assert!(!is_safe("testing <SCRIPT> tags here"));
        assert!(!is_safe("testing JavaScript: scheme here"));
        assert!(!is_safe("testing EVAL( here"));
    }

    #[test]
    fn accepts_plain_question() {
        // 30 characters of ordinary text
        let question = "What are GDPR consent rules??!";
        assert_eq!(question.len(), 30);
        assert!(is_safe(question));
    }

    #[test]
    fn validate_length_is_reusable() {
        assert!(validate_length("short", 10));
        assert!(validate_length("  padded out  ", 10));
        assert!(!validate_length("this one is definitely too long", 10));
    }
}
