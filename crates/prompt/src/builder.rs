//! Prompt builder: context summarization and template selection.

use comply_core::AppResult;
use comply_knowledge::ComplianceRecord;

use crate::classifier::classify;
use crate::templates::SYSTEM_PROMPT;
use crate::types::{BuiltPrompt, BuiltPromptMetadata, PromptTemplate, QuestionType};

/// Maximum number of records summarized into the context block.
const MAX_CONTEXT_RECORDS: usize = 5;

/// Summary shown when the ranker produced no records.
const EMPTY_CONTEXT: &str = "No specific compliance context available.";

/// Build the system and user prompts for a question.
///
/// The question type is the explicit override when given, otherwise the
/// classifier's verdict. Up to five records are summarized into a fixed
/// context block, and the per-regime template is rendered around the
/// question and that block.
pub fn build_prompt(
    question: &str,
    records: &[ComplianceRecord],
    override_type: Option<QuestionType>,
) -> AppResult<BuiltPrompt> {
    let question_type = override_type.unwrap_or_else(|| classify(question));

    tracing::debug!(
        question_type = question_type.as_str(),
        records = records.len(),
        "building prompt"
    );

    let context = summarize_context(records);
    let template = PromptTemplate::for_question(question_type);
    let user = template.render(question, &context)?;

    Ok(BuiltPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
        metadata: BuiltPromptMetadata {
            question_type,
            source_count: records.len().min(MAX_CONTEXT_RECORDS),
        },
    })
}

/// Summarize compliance records into the context block.
///
/// Missing fields render with fixed fallback strings so a sparse record
/// still produces a complete block.
pub fn summarize_context(records: &[ComplianceRecord]) -> String {
    if records.is_empty() {
        return EMPTY_CONTEXT.to_string();
    }

    records
        .iter()
        .take(MAX_CONTEXT_RECORDS)
        .map(summarize_record)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn summarize_record(record: &ComplianceRecord) -> String {
    format!(
        "**{}** ({})\n\
         - Jurisdiction: {}\n\
         - Category: {}\n\
         - Description: {}\n\
         - Requirements: {}\n\
         - Effective Date: {}\n\
         - Domains: {}",
        or_fallback(&record.name, "Unknown Regulation"),
        or_fallback(&record.record_type, "Unknown Type"),
        or_fallback(&record.jurisdiction, "Not specified"),
        or_fallback(&record.category, "Not specified"),
        or_fallback(&record.description, "No description available"),
        or_fallback(&record.requirement, "No specific requirements listed"),
        or_fallback(&record.effective_date, "Not specified"),
        record.domains.join(", "),
    )
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gdpr_record() -> ComplianceRecord {
        ComplianceRecord {
            name: "GDPR".to_string(),
            record_type: "Regulation".to_string(),
            category: "Data Privacy".to_string(),
            jurisdiction: "EU, EEA".to_string(),
            description: "General Data Protection Regulation".to_string(),
            requirement: "Notify breaches within 72 hours".to_string(),
            effective_date: "2018-05-25".to_string(),
            domains: vec!["privacy".to_string(), "security".to_string()],
        }
    }

    #[test]
    fn prompt_contains_question_verbatim() {
        let built = build_prompt("What are the GDPR rules?", &[gdpr_record()], None).unwrap();
        assert!(built.user.contains("What are the GDPR rules?"));
    }

    #[test]
    fn prompt_contains_record_names() {
        let records = vec![
            gdpr_record(),
            ComplianceRecord {
                name: "SOC 2".to_string(),
                ..Default::default()
            },
        ];

        let built = build_prompt("What applies to our data handling?", &records, None).unwrap();
        assert!(built.user.contains("**GDPR**"));
        assert!(built.user.contains("**SOC 2**"));
    }

    #[test]
    fn empty_records_use_fixed_literal() {
        let summary = summarize_context(&[]);
        assert_eq!(summary, "No specific compliance context available.");
    }

    #[test]
    fn missing_fields_get_fallbacks() {
        let summary = summarize_context(&[ComplianceRecord::default()]);
        assert!(summary.contains("**Unknown Regulation** (Unknown Type)"));
        assert!(summary.contains("- Description: No description available"));
        assert!(summary.contains("- Requirements: No specific requirements listed"));
        assert!(summary.contains("- Effective Date: Not specified"));
    }

    #[test]
    fn summary_caps_at_five_records() {
        let records: Vec<ComplianceRecord> = (0..7)
            .map(|i| ComplianceRecord {
                name: format!("Reg-{}", i),
                ..Default::default()
            })
            .collect();

        let summary = summarize_context(&records);
        assert!(summary.contains("**Reg-4**"));
        assert!(!summary.contains("**Reg-5**"));
    }

    #[test]
    fn domains_join_with_commas() {
        let summary = summarize_context(&[gdpr_record()]);
        assert!(summary.contains("- Domains: privacy, security"));
    }

    #[test]
    fn override_wins_over_classifier() {
        // Question classifies as GDPR, but the override forces SOC 2
        let built = build_prompt(
            "What are the GDPR rules?",
            &[gdpr_record()],
            Some(QuestionType::Soc2),
        )
        .unwrap();

        assert_eq!(built.metadata.question_type, QuestionType::Soc2);
        assert!(built.user.contains("SOC 2 compliance expert"));
    }

    #[test]
    fn classifier_selects_gdpr_template() {
        let built = build_prompt("gdpr breach notification?", &[gdpr_record()], None).unwrap();
        assert_eq!(built.metadata.question_type, QuestionType::Gdpr);
        assert!(built.user.contains("GDPR compliance specialist"));
    }

    #[test]
    fn system_prompt_is_type_independent() {
        let general = build_prompt("invoice retention rules", &[], None).unwrap();
        let gdpr = build_prompt("gdpr consent question", &[], None).unwrap();
        assert_eq!(general.system, gdpr.system);
        assert_eq!(general.system, SYSTEM_PROMPT);
    }
}
