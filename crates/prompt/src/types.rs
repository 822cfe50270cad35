//! Prompt types for the ComplyBot service.

use serde::{Deserialize, Serialize};

use comply_core::AppResult;

use crate::templates;

/// Classified intent of a compliance question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Gdpr,
    Soc2,
    Hipaa,
    General,
}

impl QuestionType {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gdpr => "gdpr",
            Self::Soc2 => "soc2",
            Self::Hipaa => "hipaa",
            Self::General => "general",
        }
    }
}

/// The closed set of prompt templates.
///
/// HIPAA questions are classified distinctly but render with the general
/// compliance template; only GDPR and SOC 2 have specialized templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    General,
    Gdpr,
    Soc2,
}

impl PromptTemplate {
    /// Select the template for a classified question type.
    pub fn for_question(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::Gdpr => Self::Gdpr,
            QuestionType::Soc2 => Self::Soc2,
            QuestionType::Hipaa | QuestionType::General => Self::General,
        }
    }

    /// Render this template with the question and context summary.
    pub fn render(&self, question: &str, context: &str) -> AppResult<String> {
        match self {
            Self::General => templates::render_general(question, context),
            Self::Gdpr => templates::render_gdpr(question, context),
            Self::Soc2 => templates::render_soc2(question, context),
        }
    }
}

/// A fully built prompt ready for the completion gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// System message
    pub system: String,

    /// User message (question + context, template-rendered)
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Resolved question type
    #[serde(rename = "questionType")]
    pub question_type: QuestionType,

    /// Number of records summarized into the context
    #[serde(rename = "sourceCount")]
    pub source_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hipaa_renders_with_general_template() {
        assert_eq!(
            PromptTemplate::for_question(QuestionType::Hipaa),
            PromptTemplate::General
        );
        assert_eq!(
            PromptTemplate::for_question(QuestionType::Gdpr),
            PromptTemplate::Gdpr
        );
        assert_eq!(
            PromptTemplate::for_question(QuestionType::Soc2),
            PromptTemplate::Soc2
        );
    }

    #[test]
    fn question_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&QuestionType::Gdpr).unwrap(),
            "\"gdpr\""
        );
        assert_eq!(QuestionType::Soc2.as_str(), "soc2");
    }
}
