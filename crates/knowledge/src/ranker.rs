//! Rule-based relevance ranking.
//!
//! Scores every record against the lower-cased question with additive
//! substring heuristics. This is deliberately not semantic search: exact
//! wording drives results, with no stemming and no fuzzy matching beyond
//! case folding.

use crate::types::ComplianceRecord;

/// Maximum number of records a ranking call returns.
pub const MAX_RESULTS: usize = 5;

/// Question words at or below this length carry no keyword signal.
const MIN_KEYWORD_LENGTH: usize = 3;

/// Regulation-family keyword groups used for score boosting.
///
/// A group contributes +12 when the question mentions any synonym AND the
/// record's description or name contains a synonym from the same group.
/// The boost intentionally compounds with the plain name/category/keyword
/// signals for the same token.
const SPECIAL_KEYWORDS: &[(&str, &[&str])] = &[
    ("gdpr", &["gdpr", "general data protection regulation"]),
    ("hipaa", &["hipaa", "health insurance portability"]),
    ("soc", &["soc", "service organization control"]),
    ("ccpa", &["ccpa", "california consumer privacy"]),
    ("audit", &["audit", "auditing", "compliance audit"]),
    ("breach", &["breach", "data breach", "security incident"]),
    ("consent", &["consent", "user consent", "data consent"]),
];

/// A record paired with its computed relevance score.
#[derive(Debug, Clone)]
pub struct ScoredMatch {
    /// The matched record
    pub record: ComplianceRecord,

    /// Additive relevance score, always > 0
    pub score: u32,
}

/// Rank records against a question and return the top matches.
///
/// Records scoring 0 are excluded entirely. The remainder is sorted by
/// descending score with a stable sort, so ties keep their encounter
/// order, and truncated to [`MAX_RESULTS`].
pub fn rank(question: &str, records: &[ComplianceRecord]) -> Vec<ScoredMatch> {
    if records.is_empty() {
        return Vec::new();
    }

    let question_lower = question.to_lowercase();
    let question_words: Vec<&str> = question_lower
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_KEYWORD_LENGTH)
        .collect();

    let mut scored: Vec<ScoredMatch> = records
        .iter()
        .filter_map(|record| {
            let score = score_record(&question_lower, &question_words, record);
            (score > 0).then(|| ScoredMatch {
                record: record.clone(),
                score,
            })
        })
        .collect();

    // Vec::sort_by is stable: equal scores keep dataset order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_RESULTS);

    tracing::debug!(
        matches = scored.len(),
        top_score = scored.first().map(|m| m.score).unwrap_or(0),
        "ranked compliance records"
    );

    scored
}

/// Compute the additive relevance score for a single record.
///
/// Empty record fields never match: an absent name or category must not
/// award points to every question.
fn score_record(question_lower: &str, question_words: &[&str], record: &ComplianceRecord) -> u32 {
    let mut score = 0u32;

    // High priority matches
    let name = record.name.to_lowercase();
    if !name.is_empty() && question_lower.contains(&name) {
        score += 20;
    }

    let category = record.category.to_lowercase();
    if !category.is_empty() && question_lower.contains(&category) {
        score += 15;
    }

    // Domain matches, summed per matching domain
    for domain in &record.domains {
        let domain = domain.to_lowercase();
        if !domain.is_empty() && question_lower.contains(&domain) {
            score += 10;
        }
    }

    // Jurisdiction is a comma-separated free-text list
    let jurisdiction = record.jurisdiction.to_lowercase();
    if jurisdiction
        .split(',')
        .map(str::trim)
        .any(|token| !token.is_empty() && question_lower.contains(token))
    {
        score += 8;
    }

    // Keyword matches against description and requirement text
    let description = record.description.to_lowercase();
    let requirement = record.requirement.to_lowercase();
    for word in question_words {
        if description.contains(word) {
            score += 2;
        }
        if requirement.contains(word) {
            score += 3;
        }
    }

    // Special keyword boosting
    for (_group, synonyms) in SPECIAL_KEYWORDS {
        if synonyms.iter().any(|kw| question_lower.contains(kw))
            && synonyms
                .iter()
                .any(|kw| description.contains(kw) || name.contains(kw))
        {
            score += 12;
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, category: &str) -> ComplianceRecord {
        ComplianceRecord {
            name: name.to_string(),
            category: category.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_dataset_returns_empty() {
        assert!(rank("What are GDPR requirements?", &[]).is_empty());
    }

    #[test]
    fn named_record_ranks_first_and_zero_scores_are_excluded() {
        let records = vec![
            record("GDPR", "Data Privacy"),
            record("HIPAA", "Healthcare Privacy"),
        ];

        let matches = rank("What are GDPR requirements?", &records);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].record.name, "GDPR");
        assert!(matches[0].score > 0);
    }

    #[test]
    fn unrelated_question_returns_empty() {
        let records = vec![record("PCI DSS", "Payment Security")];
        let matches = rank("How do I bake sourdough bread?", &records);
        assert!(matches.is_empty());
    }

    #[test]
    fn results_are_capped_at_five() {
        let records: Vec<ComplianceRecord> = (0..8)
            .map(|i| ComplianceRecord {
                name: format!("gdpr-{}", i),
                description: "gdpr obligations".to_string(),
                ..Default::default()
            })
            .collect();

        let matches = rank("Explain the gdpr obligations", &records);

        assert_eq!(matches.len(), MAX_RESULTS);
        assert!(matches.iter().all(|m| m.score > 0));
    }

    #[test]
    fn ties_keep_encounter_order() {
        let records = vec![
            ComplianceRecord {
                name: "First".to_string(),
                description: "audit trails".to_string(),
                ..Default::default()
            },
            ComplianceRecord {
                name: "Second".to_string(),
                description: "audit trails".to_string(),
                ..Default::default()
            },
        ];

        let matches = rank("show me audit trails", &records);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].score, matches[1].score);
        assert_eq!(matches[0].record.name, "First");
        assert_eq!(matches[1].record.name, "Second");
    }

    #[test]
    fn empty_fields_never_match() {
        let records = vec![ComplianceRecord::default()];
        let matches = rank("What are the GDPR requirements?", &records);
        assert!(matches.is_empty());
    }

    #[test]
    fn domain_matches_sum() {
        let rec = ComplianceRecord {
            name: "ISO 27001".to_string(),
            domains: vec!["security".to_string(), "encryption".to_string()],
            ..Default::default()
        };

        let single = rank("how is security handled", std::slice::from_ref(&rec));
        let double = rank("security and encryption rules", std::slice::from_ref(&rec));

        assert_eq!(single[0].score, 10);
        assert_eq!(double[0].score, 20);
    }

    #[test]
    fn jurisdiction_token_matches() {
        let rec = ComplianceRecord {
            name: "CCPA".to_string(),
            jurisdiction: "California, United States".to_string(),
            ..Default::default()
        };

        let matches = rank("what applies in california here", &[rec]);
        assert_eq!(matches[0].score, 8);
    }

    #[test]
    fn special_keyword_boost_compounds_with_name_match() {
        let rec = ComplianceRecord {
            name: "GDPR".to_string(),
            description: "The general data protection regulation governs EU data.".to_string(),
            ..Default::default()
        };

        let matches = rank("gdpr scope", &[rec]);

        // name +20, special-keyword boost +12; "gdpr" itself is a 4-char
        // question word but does not appear in the description verbatim
        assert_eq!(matches[0].score, 32);
    }

    #[test]
    fn requirement_keywords_outweigh_description_keywords() {
        let rec = ComplianceRecord {
            name: "SOC 2".to_string(),
            requirement: "maintain continuous monitoring controls".to_string(),
            ..Default::default()
        };

        let matches = rank("tell me about monitoring", &[rec]);
        assert_eq!(matches[0].score, 3);
    }
}
