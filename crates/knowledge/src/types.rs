//! Knowledge base type definitions.

use serde::{Deserialize, Serialize};

/// A single compliance regulation or policy record.
///
/// Every field defaults to empty: records with missing fields must still
/// deserialize, score, and render without failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceRecord {
    /// Regulation name (e.g., "GDPR")
    #[serde(default)]
    pub name: String,

    /// Record type (e.g., "Regulation", "Standard")
    #[serde(rename = "type", default)]
    pub record_type: String,

    /// Topical category (e.g., "Data Privacy")
    #[serde(default)]
    pub category: String,

    /// Comma-separated jurisdiction list as free text (e.g., "EU, EEA")
    #[serde(default)]
    pub jurisdiction: String,

    /// Short description of the regulation
    #[serde(default)]
    pub description: String,

    /// Requirement text imposed by the regulation
    #[serde(default)]
    pub requirement: String,

    /// Effective date as free text
    #[serde(default)]
    pub effective_date: String,

    /// Business domains the record applies to
    #[serde(default)]
    pub domains: Vec<String>,
}
