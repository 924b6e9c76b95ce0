//! Conversation state machine: tracks which step a session is on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::answers::{AnswerValue, CollectedAnswers};
use super::catalog::FlowKind;
use super::engine::{AnswerCheck, Question, QuestionFlow};
use crate::error::FlowError;

/// A finished questionnaire that is not lead-scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireSubmission {
    pub questionnaire_type: FlowKind,
    pub answers: CollectedAnswers,
    pub completed_at: DateTime<Utc>,
}

impl QuestionnaireSubmission {
    /// Wrap `answers` once every field of `flow` is present; otherwise
    /// return the missing fields.
    pub fn from_answers(
        flow: &QuestionFlow,
        answers: CollectedAnswers,
    ) -> Result<Self, Vec<String>> {
        let missing = flow.missing_fields(&answers);
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(Self {
            questionnaire_type: flow.kind(),
            answers,
            completed_at: Utc::now(),
        })
    }
}

/// Per-session progress through a flow.
///
/// Only moves forward: each accepted answer advances exactly one step.
/// Serialisable so a caller can park a session and resume it later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub current_step: usize,
    pub answers: CollectedAnswers,
    pub is_complete: bool,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted answer and move to the next step.
    ///
    /// Returns the new step index. Errors once the flow of `total_steps`
    /// questions is exhausted.
    pub fn advance(
        &mut self,
        field: &str,
        value: AnswerValue,
        total_steps: usize,
    ) -> Result<usize, FlowError> {
        if self.current_step >= total_steps {
            return Err(FlowError::AlreadyComplete { total: total_steps });
        }
        self.answers.record(field, value);
        self.current_step += 1;
        self.is_complete = self.current_step >= total_steps;
        Ok(self.current_step)
    }
}

/// A live conversation: one flow plus the session's state.
#[derive(Debug, Clone)]
pub struct Conversation<'f> {
    flow: &'f QuestionFlow,
    state: ConversationState,
}

impl<'f> Conversation<'f> {
    /// Start at step 0 with no answers.
    pub fn new(flow: &'f QuestionFlow) -> Self {
        Self {
            flow,
            state: ConversationState::new(),
        }
    }

    /// Continue from a previously saved state.
    ///
    /// The snapshot must be consistent with `flow`: the step index in range,
    /// every earlier step's field answered, and the completion flag matching
    /// the index.
    pub fn resume(flow: &'f QuestionFlow, state: ConversationState) -> Result<Self, FlowError> {
        if state.current_step > flow.len() {
            return Err(FlowError::CorruptState(format!(
                "step {} beyond flow {} of {} steps",
                state.current_step,
                flow.kind(),
                flow.len()
            )));
        }
        if state.is_complete != flow.is_complete(state.current_step) {
            return Err(FlowError::CorruptState(format!(
                "completion flag {} does not match step {}",
                state.is_complete, state.current_step
            )));
        }
        let missing: Vec<&str> = flow
            .fields()
            .take(state.current_step)
            .filter(|f| !state.answers.contains(f))
            .collect();
        if !missing.is_empty() {
            return Err(FlowError::CorruptState(format!(
                "answers missing for {}",
                missing.join(", ")
            )));
        }

        debug!(flow = %flow.kind(), step = state.current_step, "Conversation resumed");
        Ok(Self { flow, state })
    }

    pub fn flow(&self) -> &QuestionFlow {
        self.flow
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn into_state(self) -> ConversationState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete
    }

    /// The question to show now, or `None` once complete.
    pub fn current_question(&self) -> Option<Question> {
        if self.state.is_complete {
            return None;
        }
        Some(self.flow.question(self.state.current_step, &self.state.answers))
    }

    /// Submit one raw answer for the current step.
    ///
    /// Accepted answers are recorded and advance the conversation by one
    /// step; rejections and detours leave the state untouched.
    pub fn submit(&mut self, raw: &str) -> AnswerCheck {
        let check = self
            .flow
            .validate_answer(self.state.current_step, raw, &self.state.answers);

        if let AnswerCheck::Accepted { field, value, .. } = &check {
            // validate_answer only accepts in-range steps, so this cannot fail.
            if let Err(e) = self.state.advance(field, value.clone(), self.flow.len()) {
                return AnswerCheck::Rejected {
                    message: e.to_string(),
                };
            }
            debug!(
                flow = %self.flow.kind(),
                field = %field,
                step = self.state.current_step,
                "Answer accepted"
            );
        }
        check
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::catalog::{FlowCatalog, FlowKind};

    const READINESS_ANSWERS: &[&str] = &[
        "Jo",
        "Acme",
        "large",
        "10",
        "manufacturing",
        "just starting",
        "EcoVadis",
        "need reporting help",
        "jo@acme.com",
    ];

    fn catalog() -> FlowCatalog {
        FlowCatalog::builtin().unwrap()
    }

    #[test]
    fn advance_walks_to_completion() {
        let mut state = ConversationState::new();
        assert_eq!(state.advance("a", "x".into(), 2).unwrap(), 1);
        assert!(!state.is_complete);
        assert_eq!(state.advance("b", 3u32.into(), 2).unwrap(), 2);
        assert!(state.is_complete);
        assert!(matches!(
            state.advance("c", "y".into(), 2),
            Err(FlowError::AlreadyComplete { total: 2 })
        ));
        assert_eq!(state.answers.len(), 2);
    }

    #[test]
    fn valid_answers_advance_exactly_one_step() {
        let catalog = catalog();
        let flow = catalog.get(FlowKind::Readiness);
        assert_eq!(flow.len(), READINESS_ANSWERS.len());

        let mut convo = Conversation::new(flow);
        for (i, input) in READINESS_ANSWERS.iter().enumerate() {
            assert_eq!(convo.state().current_step, i);
            let check = convo.submit(input);
            assert!(check.is_accepted(), "step {i} rejected {input:?}: {check:?}");
            assert_eq!(convo.state().current_step, i + 1);
        }
        assert!(convo.is_complete());
        assert!(convo.current_question().is_none());
        assert!(flow.missing_fields(&convo.state().answers).is_empty());
    }

    #[test]
    fn invalid_answers_leave_state_unchanged() {
        let catalog = catalog();
        let flow = catalog.get(FlowKind::Readiness);
        let mut convo = Conversation::new(flow);
        convo.submit("Jo");
        convo.submit("Acme");

        let before = convo.state().clone();
        for bad in ["", "enormous", "-"] {
            let check = convo.submit(bad);
            assert!(matches!(check, AnswerCheck::Rejected { .. }), "{bad:?}");
            assert_eq!(convo.state(), &before);
        }
    }

    #[test]
    fn detour_redisplays_same_step() {
        let catalog = catalog();
        let flow = catalog.get(FlowKind::Readiness);
        let mut convo = Conversation::new(flow);
        for input in &READINESS_ANSWERS[..6] {
            assert!(convo.submit(input).is_accepted());
        }
        let question_before = convo.current_question().unwrap();
        assert_eq!(question_before.field, "certification_interest");

        let check = convo.submit("What's the difference?");
        assert!(matches!(check, AnswerCheck::Detour { .. }));
        assert_eq!(convo.state().current_step, 6);
        assert_eq!(convo.current_question().unwrap(), question_before);
    }

    #[test]
    fn resumed_conversation_matches_uninterrupted_one() {
        let catalog = catalog();
        let flow = catalog.get(FlowKind::Readiness);

        let mut uninterrupted = Conversation::new(flow);
        for input in &READINESS_ANSWERS[..4] {
            uninterrupted.submit(input);
        }

        let json = serde_json::to_string(uninterrupted.state()).unwrap();
        let saved: ConversationState = serde_json::from_str(&json).unwrap();
        let mut resumed = Conversation::resume(flow, saved).unwrap();

        assert_eq!(resumed.current_question(), uninterrupted.current_question());
        for input in &READINESS_ANSWERS[4..] {
            assert_eq!(resumed.submit(input), uninterrupted.submit(input));
            assert_eq!(resumed.current_question(), uninterrupted.current_question());
        }
    }

    #[test]
    fn submission_requires_every_field() {
        let catalog = catalog();
        let flow = catalog.get(FlowKind::Readiness);
        let partial = CollectedAnswers::new().with("contact_name", "Jo");
        let missing = QuestionnaireSubmission::from_answers(flow, partial).unwrap_err();
        assert_eq!(missing.len(), flow.len() - 1);

        let mut convo = Conversation::new(flow);
        for input in READINESS_ANSWERS {
            convo.submit(input);
        }
        let submission =
            QuestionnaireSubmission::from_answers(flow, convo.into_state().answers).unwrap();
        assert_eq!(submission.questionnaire_type, FlowKind::Readiness);
    }

    #[test]
    fn resume_rejects_inconsistent_snapshots() {
        let catalog = catalog();
        let flow = catalog.get(FlowKind::Readiness);

        let beyond = ConversationState {
            current_step: flow.len() + 1,
            ..ConversationState::default()
        };
        assert!(matches!(
            Conversation::resume(flow, beyond),
            Err(FlowError::CorruptState(_))
        ));

        let missing = ConversationState {
            current_step: 2,
            answers: CollectedAnswers::new().with("contact_name", "Jo"),
            is_complete: false,
        };
        assert!(matches!(
            Conversation::resume(flow, missing),
            Err(FlowError::CorruptState(_))
        ));

        let wrong_flag = ConversationState {
            current_step: 0,
            answers: CollectedAnswers::new(),
            is_complete: true,
        };
        assert!(Conversation::resume(flow, wrong_flag).is_err());
    }
}
