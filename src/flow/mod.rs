//! Question flows: scripted, step-by-step interviews.
//!
//! A flow is an immutable list of question steps. The engine renders each
//! prompt against the answers collected so far, validates and normalises
//! raw input, and a [`Conversation`] walks a single session forward one
//! accepted answer at a time.

pub mod answers;
pub mod catalog;
pub mod engine;
pub mod state;
pub mod step;
pub mod template;
pub mod validate;

pub use answers::{AnswerValue, CollectedAnswers};
pub use catalog::{FlowCatalog, FlowKind};
pub use engine::{AnswerCheck, Question, QuestionFlow};
pub use state::{Conversation, ConversationState, QuestionnaireSubmission};
pub use step::QuestionStep;
pub use validate::{AnswerRule, ChoiceOption, Synonym, Validation};
