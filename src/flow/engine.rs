//! The question flow engine: step lookup, prompt rendering and answer
//! validation over an immutable list of [`QuestionStep`]s.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use super::answers::{AnswerValue, CollectedAnswers};
use super::catalog::FlowKind;
use super::step::QuestionStep;
use super::template;
use super::validate::{ChoiceOption, Validation};
use crate::error::FlowError;

/// A rendered question, ready to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub step: usize,
    pub total_steps: usize,
    pub field: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
}

/// Result of checking one answer against a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerCheck {
    /// Store `value` under `field`; `message` is the rendered acknowledgement.
    Accepted {
        field: String,
        value: AnswerValue,
        message: Option<String>,
    },
    /// Re-prompt the same step.
    Rejected { message: String },
    /// Show `message`, then the same step again.
    Detour { message: String },
}

impl AnswerCheck {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// The user-facing message carried by any outcome.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Accepted { message, .. } => message.as_deref(),
            Self::Rejected { message } | Self::Detour { message } => Some(message),
        }
    }
}

/// An immutable, ordered questionnaire.
#[derive(Debug, Clone)]
pub struct QuestionFlow {
    kind: FlowKind,
    steps: Vec<QuestionStep>,
}

impl QuestionFlow {
    /// Build a flow, checking the question table for authoring errors:
    /// empty tables, duplicate fields, and templates that reference a field
    /// before the step that collects it.
    pub fn new(kind: FlowKind, steps: Vec<QuestionStep>) -> Result<Self, FlowError> {
        let flow = kind.to_string();
        if steps.is_empty() {
            return Err(FlowError::Empty { flow });
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for (index, step) in steps.iter().enumerate() {
            let unresolved = template::placeholders(&step.prompt)
                .into_iter()
                .chain(
                    step.explanation
                        .as_deref()
                        .map(template::placeholders)
                        .unwrap_or_default(),
                )
                .find(|p| !seen.contains(p));
            if let Some(placeholder) = unresolved {
                return Err(FlowError::UnresolvedPlaceholder {
                    flow,
                    step: index,
                    field: step.field.clone(),
                    placeholder: placeholder.to_string(),
                });
            }

            if !seen.insert(step.field.as_str()) {
                return Err(FlowError::DuplicateField {
                    flow,
                    field: step.field.clone(),
                });
            }

            // Success messages render after this step's answer is stored.
            if let Some(success) = &step.success {
                if let Some(placeholder) = template::placeholders(success)
                    .into_iter()
                    .find(|p| !seen.contains(p))
                {
                    return Err(FlowError::UnresolvedPlaceholder {
                        flow,
                        step: index,
                        field: step.field.clone(),
                        placeholder: placeholder.to_string(),
                    });
                }
            }

            let is_choice = matches!(step.rule, super::validate::AnswerRule::Choice { .. });
            if is_choice && step.options.is_empty() {
                return Err(FlowError::InvalidStep {
                    flow,
                    step: index,
                    field: step.field.clone(),
                    reason: "choice step has no options".into(),
                });
            }
        }

        Ok(Self { kind, steps })
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[QuestionStep] {
        &self.steps
    }

    /// Every declared field, in step order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.field.as_str())
    }

    /// Declared fields that `answers` does not contain yet.
    pub fn missing_fields(&self, answers: &CollectedAnswers) -> Vec<String> {
        self.fields()
            .filter(|f| !answers.contains(f))
            .map(String::from)
            .collect()
    }

    /// Stored answers that their step would not accept, as
    /// `(field, message)` in step order. A value that only triggers a
    /// detour counts as not accepted.
    pub fn invalid_answers(&self, answers: &CollectedAnswers) -> Vec<(String, String)> {
        self.steps
            .iter()
            .filter_map(|def| {
                let value = answers.get(&def.field)?;
                match def.rule.validate(&value.to_string(), &def.options, answers) {
                    Validation::Valid { .. } => None,
                    Validation::Invalid { message } | Validation::Detour { message } => {
                        Some((def.field.clone(), message))
                    }
                }
            })
            .collect()
    }

    /// True once `step` has moved past the last question.
    pub fn is_complete(&self, step: usize) -> bool {
        step >= self.steps.len()
    }

    /// Render the question at `step`, clamped to the last step.
    ///
    /// Placeholders with no answer are left in the text and logged; they
    /// mean a caller skipped a step.
    pub fn question(&self, step: usize, answers: &CollectedAnswers) -> Question {
        let index = step.min(self.steps.len() - 1);
        let def = &self.steps[index];

        let prompt = template::render(&def.prompt, answers);
        if !prompt.unresolved.is_empty() {
            warn!(
                flow = %self.kind,
                step = index,
                unresolved = ?prompt.unresolved,
                "Question rendered with unresolved placeholders"
            );
        }

        Question {
            step: index,
            total_steps: self.steps.len(),
            field: def.field.clone(),
            prompt: prompt.text,
            explanation: def
                .explanation
                .as_deref()
                .map(|e| template::render(e, answers).text),
            options: def.options.clone(),
        }
    }

    /// Validate `raw` as the answer to `step`. Never mutates `answers`.
    pub fn validate_answer(
        &self,
        step: usize,
        raw: &str,
        answers: &CollectedAnswers,
    ) -> AnswerCheck {
        let Some(def) = self.steps.get(step) else {
            return AnswerCheck::Rejected {
                message: "Interview already complete.".into(),
            };
        };

        match def.rule.validate(raw, &def.options, answers) {
            Validation::Valid { value } => {
                let message = def.success.as_deref().map(|tpl| {
                    let with_current = answers.clone().with(def.field.as_str(), value.clone());
                    template::render(tpl, &with_current).text
                });
                AnswerCheck::Accepted {
                    field: def.field.clone(),
                    value,
                    message,
                }
            }
            Validation::Invalid { message } => AnswerCheck::Rejected { message },
            Validation::Detour { message } => AnswerCheck::Detour { message },
        }
    }
}
