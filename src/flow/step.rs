//! Static question step definitions.

use super::validate::{AnswerRule, ChoiceOption};

/// One question/validation unit in a fixed sequence.
#[derive(Debug, Clone)]
pub struct QuestionStep {
    /// Unique key the answer is stored under.
    pub field: String,
    /// Prompt template; may reference earlier fields as `{field}`.
    pub prompt: String,
    /// Secondary text shown under the prompt.
    pub explanation: Option<String>,
    /// Quick-reply choices. Empty for free-text steps.
    pub options: Vec<ChoiceOption>,
    pub rule: AnswerRule,
    /// Acknowledgement template shown after an accepted answer.
    pub success: Option<String>,
}

impl QuestionStep {
    pub fn new(field: &str, prompt: &str, rule: AnswerRule) -> Self {
        Self {
            field: field.to_string(),
            prompt: prompt.to_string(),
            explanation: None,
            options: Vec::new(),
            rule,
            success: None,
        }
    }

    pub fn with_explanation(mut self, text: &str) -> Self {
        self.explanation = Some(text.to_string());
        self
    }

    pub fn with_options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_success(mut self, template: &str) -> Self {
        self.success = Some(template.to_string());
        self
    }
}
