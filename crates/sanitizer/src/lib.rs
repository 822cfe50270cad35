//! Input sanitization for the ComplyBot service.
//!
//! Questions pass through here before any other component sees them:
//! - `redact`: masks PII and sensitive substrings with fixed placeholders
//! - `safety`: rejects empty, oversized, or injection-shaped input
//!
//! Nothing leaves the process boundary unredacted.

pub mod redact;
pub mod safety;

// Re-export main entry points
pub use redact::{redaction_table, sanitize, sanitize_with_report, SanitizationResult};
pub use safety::{is_safe, validate_length, MAX_QUESTION_LENGTH, MIN_QUESTION_LENGTH};
