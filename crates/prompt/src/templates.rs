//! Fixed prompt templates.
//!
//! One constant per template variant, rendered with Handlebars. Template
//! text is versioned with the crate and never generated dynamically beyond
//! interpolation of the question and the context summary.

use handlebars::Handlebars;
use serde_json::json;

use comply_core::{AppError, AppResult};

/// System-level instruction sent with every completion, independent of the
/// question type.
pub const SYSTEM_PROMPT: &str = "You are a professional compliance assistant with expertise in data privacy, cybersecurity, and regulatory compliance. Your role is to provide accurate, confident, and actionable answers based on the internal compliance policies and regulations provided.

Guidelines:
- Provide clear, professional, and confident responses
- Base your answers strictly on the provided reference context
- Use specific regulatory names, requirements, and procedures when available
- Structure your responses with clear sections and bullet points when appropriate
- If information is not available in the context, clearly state this limitation
- Always maintain a professional tone suitable for business compliance discussions
- Include relevant compliance framework references (GDPR, SOC 2, HIPAA, etc.) when applicable";

const GENERAL_TEMPLATE: &str = r#"You are a compliance assistant. Based on the following internal compliance policies and the question provided, generate a confident, professional, and accurate response:

Question: "{{question}}"

Reference Context:
{{context}}

Please provide a comprehensive answer that:
1. Directly addresses the question
2. References specific compliance frameworks or regulations when applicable
3. Provides actionable guidance or steps if relevant
4. Maintains professional compliance language

Answer:"#;

const GDPR_TEMPLATE: &str = r#"You are a GDPR compliance specialist. Based on the GDPR requirements and policies provided, answer the following question with specific reference to GDPR articles, requirements, and procedures:

Question: "{{question}}"

GDPR Context:
{{context}}

Please provide a detailed response that includes:
1. Relevant GDPR articles or requirements
2. Specific data subject rights if applicable
3. Required procedures or documentation
4. Compliance deadlines or timeframes if relevant
5. Potential penalties or risks for non-compliance

Answer:"#;

const SOC2_TEMPLATE: &str = r#"You are a SOC 2 compliance expert. Based on the SOC 2 Trust Service Criteria and internal policies provided, answer the following question with specific reference to SOC 2 requirements:

Question: "{{question}}"

SOC 2 Context:
{{context}}

Please provide a comprehensive response that includes:
1. Relevant Trust Service Criteria (Security, Availability, Processing Integrity, Confidentiality, Privacy)
2. Required controls or procedures
3. Evidence or documentation requirements
4. Implementation guidance
5. Monitoring and testing requirements

Answer:"#;

/// Render the general compliance template.
pub fn render_general(question: &str, context: &str) -> AppResult<String> {
    render_template(GENERAL_TEMPLATE, question, context)
}

/// Render the GDPR-specific template.
pub fn render_gdpr(question: &str, context: &str) -> AppResult<String> {
    render_template(GDPR_TEMPLATE, question, context)
}

/// Render the SOC 2-specific template.
pub fn render_soc2(question: &str, context: &str) -> AppResult<String> {
    render_template(SOC2_TEMPLATE, question, context)
}

/// Render a Handlebars template with the question and context variables.
fn render_template(template: &str, question: &str, context: &str) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Prompts are plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", &json!({ "question": question, "context": context }))
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_template_interpolates() {
        let rendered = render_general("What applies here?", "CTX-BLOCK").unwrap();
        assert!(rendered.contains("Question: \"What applies here?\""));
        assert!(rendered.contains("CTX-BLOCK"));
        assert!(rendered.contains("You are a compliance assistant."));
    }

    #[test]
    fn gdpr_template_interpolates() {
        let rendered = render_gdpr("Breach rules?", "CTX").unwrap();
        assert!(rendered.contains("GDPR compliance specialist"));
        assert!(rendered.contains("Breach rules?"));
        assert!(rendered.contains("Potential penalties or risks for non-compliance"));
    }

    #[test]
    fn soc2_template_interpolates() {
        let rendered = render_soc2("Controls?", "CTX").unwrap();
        assert!(rendered.contains("SOC 2 compliance expert"));
        assert!(rendered.contains("Trust Service Criteria"));
    }

    #[test]
    fn no_html_escaping() {
        let rendered = render_general("Does \"consent\" & <notice> apply?", "CTX").unwrap();
        assert!(rendered.contains("Does \"consent\" & <notice> apply?"));
    }

    #[test]
    fn system_prompt_sets_role_and_context_constraint() {
        assert!(SYSTEM_PROMPT.contains("professional compliance assistant"));
        assert!(SYSTEM_PROMPT.contains("Base your answers strictly on the provided reference context"));
    }
}
