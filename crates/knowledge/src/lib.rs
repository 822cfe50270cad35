//! Compliance knowledge base.
//!
//! A small, static, in-memory record set with rule-based relevance ranking.
//! Records load once at startup from a JSON file into a shared-read store;
//! the ranker scores every record against a sanitized question and returns
//! the top matches.

pub mod ranker;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use ranker::{rank, ScoredMatch, MAX_RESULTS};
pub use store::ComplianceStore;
pub use types::ComplianceRecord;
