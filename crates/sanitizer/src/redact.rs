//! Pattern-based PII redaction.
//!
//! Redactions are applied as an ordered table of (pattern, placeholder)
//! pairs. Order matters: the long-alphanumeric API-key pattern must run
//! after email/URL redaction so it never re-matches text an earlier rule
//! already replaced, and no placeholder may itself match a later pattern.
//! Both properties are asserted by tests against this table.

use regex::Regex;
use std::sync::LazyLock;

/// A single redaction rule: every match of `pattern` is replaced by
/// `placeholder`.
pub struct Redaction {
    /// Short class name, used in logs and tests
    pub class: &'static str,

    /// Compiled matching pattern
    pub pattern: Regex,

    /// Fixed replacement token
    pub placeholder: &'static str,
}

static REDACTIONS: LazyLock<Vec<Redaction>> = LazyLock::new(|| {
    let rule = |class, pattern: &str, placeholder| Redaction {
        class,
        pattern: Regex::new(pattern).expect("valid redaction pattern"),
        placeholder,
    };

    vec![
        rule(
            "email",
            r"(?i)\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
            "[EMAIL_REDACTED]",
        ),
        rule(
            "phone",
            r"(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}",
            "[PHONE_REDACTED]",
        ),
        rule("ssn", r"\b\d{3}-?\d{2}-?\d{4}\b", "[SSN_REDACTED]"),
        rule(
            "credit_card",
            r"\b(?:\d{4}[-\s]?){3}\d{4}\b",
            "[CARD_REDACTED]",
        ),
        rule(
            "ip_address",
            r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b",
            "[IP_REDACTED]",
        ),
        rule(
            "url",
            r"(?i)https?://(?:[-\w.])+(?:[:\d]+)?(?:/(?:[\w/_.])*(?:\?(?:[\w&=%.])*)?(?:#(?:\w*))?)?",
            "[URL_REDACTED]",
        ),
        rule("api_key", r"\b[A-Za-z0-9]{32,}\b", "[API_KEY_REDACTED]"),
        rule(
            "password_like",
            r"(?i)\b(?:password|pwd|pass|secret|key|token)\s*[:=]\s*\S+\b",
            "[CREDENTIAL_REDACTED]",
        ),
    ]
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// The ordered redaction table.
///
/// Exposed so tests can verify ordering and placeholder safety directly
/// instead of reading the rules out of the code.
pub fn redaction_table() -> &'static [Redaction] {
    &REDACTIONS
}

/// Result of a sanitization pass.
///
/// `altered` is an observability signal only; callers that just need the
/// cleaned text use [`sanitize`].
#[derive(Debug, Clone)]
pub struct SanitizationResult {
    /// Sanitized text with sensitive substrings masked
    pub text: String,

    /// Whether redaction changed the input length
    pub altered: bool,
}

/// Sanitize user input by masking PII and sensitive information.
///
/// Returns the empty string for empty or whitespace-only input. Otherwise
/// trims, applies every redaction rule in table order, collapses whitespace
/// runs to single spaces, and trims again.
pub fn sanitize(text: &str) -> String {
    sanitize_with_report(text).text
}

/// Sanitize user input, reporting whether anything was redacted.
pub fn sanitize_with_report(text: &str) -> SanitizationResult {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return SanitizationResult {
            text: String::new(),
            altered: false,
        };
    }

    // Original length for monitoring
    let original_length = trimmed.chars().count();

    let mut sanitized = trimmed.to_string();
    for rule in redaction_table() {
        sanitized = rule
            .pattern
            .replace_all(&sanitized, rule.placeholder)
            .into_owned();
    }

    // Remove excessive whitespace
    let sanitized = WHITESPACE_RUN
        .replace_all(&sanitized, " ")
        .trim()
        .to_string();

    let sanitized_length = sanitized.chars().count();
    let altered = sanitized_length != original_length;

    if altered {
        tracing::info!(
            original_length,
            sanitized_length,
            "input sanitized: sensitive content redacted"
        );
    }

    SanitizationResult {
        text: sanitized,
        altered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   \t\n  "), "");
    }

    #[test]
    fn clean_text_unchanged() {
        let text = "What are the GDPR data breach notification requirements?";
        let result = sanitize_with_report(text);
        assert_eq!(result.text, text);
        assert!(!result.altered);
    }

    #[test]
    fn redacts_email() {
        let out = sanitize("Contact alice.smith@example.com about the audit");
        assert!(out.contains("[EMAIL_REDACTED]"));
        assert!(!out.contains("alice.smith@example.com"));
    }

    #[test]
    fn redacts_phone() {
        let out = sanitize("Call me at (555) 123-4567 tomorrow");
        assert!(out.contains("[PHONE_REDACTED]"));
        assert!(!out.contains("123-4567"));
    }

    #[test]
    fn redacts_ssn() {
        let out = sanitize("My SSN is 123-45-6789 if you need it");
        assert!(out.contains("[SSN_REDACTED]"));
        assert!(!out.contains("123-45-6789"));
    }

    #[test]
    fn redacts_credit_card() {
        let out = sanitize("Card number 4111-1111-1111-1111 was charged");
        assert!(out.contains("[CARD_REDACTED]"));
        assert!(!out.contains("4111-1111-1111-1111"));
    }

    #[test]
    fn redacts_ip_address() {
        let out = sanitize("The server at 192.168.1.100 logged the access");
        assert!(out.contains("[IP_REDACTED]"));
        assert!(!out.contains("192.168.1.100"));
    }

    #[test]
    fn redacts_url() {
        let out = sanitize("See https://internal.example.com/policies?id=42 for details");
        assert!(out.contains("[URL_REDACTED]"));
        assert!(!out.contains("internal.example.com"));
    }

    #[test]
    fn redacts_api_key_shaped_token() {
        // Digit-sparse so the earlier phone rule cannot claim a digit run
        let out = sanitize("Token AbCdEfGhIjKlMnOpQrStUvWxYz012345 leaked");
        assert!(out.contains("[API_KEY_REDACTED]"));
        assert!(!out.contains("AbCdEfGhIjKlMnOpQrStUvWxYz012345"));
    }

    #[test]
    fn redacts_credential_pair() {
        let out = sanitize("my password: hunter2 got posted");
        assert!(out.contains("[CREDENTIAL_REDACTED]"));
        assert!(!out.contains("hunter2"));

        let out = sanitize("SECRET=supersafe and more");
        assert!(out.contains("[CREDENTIAL_REDACTED]"));
        assert!(!out.contains("supersafe"));
    }

    #[test]
    fn collapses_whitespace() {
        let out = sanitize("what   about\n\n  consent   rules");
        assert_eq!(out, "what about consent rules");
    }

    #[test]
    fn reports_altered_on_redaction() {
        let result = sanitize_with_report("mail bob@example.com now");
        assert!(result.altered);
    }

    #[test]
    fn placeholders_never_rematch_any_pattern() {
        // No placeholder may match any rule in the table, or sanitization
        // would not be idempotent.
        for rule in redaction_table() {
            for other in redaction_table() {
                assert!(
                    !other.pattern.is_match(rule.placeholder),
                    "placeholder {} re-matches pattern {}",
                    rule.placeholder,
                    other.class
                );
            }
        }
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            "Contact alice@example.com or call (555) 123-4567",
            "ssn 123-45-6789 card 4111 1111 1111 1111",
            "see https://example.com/a?b=c and 10.0.0.1",
            "password: hunter2 token=abc123 key: v",
            "AKIA0123456789ABCDEF0123456789ABCDEF is a key",
            "a perfectly ordinary compliance question",
        ];

        for input in inputs {
            let once = sanitize(input);
            let twice = sanitize(&once);
            assert_eq!(once, twice, "sanitize not idempotent for {:?}", input);
        }
    }
}
