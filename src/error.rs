//! Error types for the ESG interview service.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Question-table authoring errors and corrupt conversation snapshots.
///
/// These indicate a programming error in a static flow definition or a
/// tampered snapshot, never a bad user answer.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Flow {flow} has no steps")]
    Empty { flow: String },

    #[error("Flow {flow} declares field {field} more than once")]
    DuplicateField { flow: String, field: String },

    #[error("Step {step} ({field}) of flow {flow} references {{{placeholder}}} before it is collected")]
    UnresolvedPlaceholder {
        flow: String,
        step: usize,
        field: String,
        placeholder: String,
    },

    #[error("Step {step} ({field}) of flow {flow}: {reason}")]
    InvalidStep {
        flow: String,
        step: usize,
        field: String,
        reason: String,
    },

    #[error("Conversation already complete after {total} steps")]
    AlreadyComplete { total: usize },

    #[error("Corrupt conversation state: {0}")]
    CorruptState(String),
}

/// Lead scoring errors.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("Incomplete interview, missing: {}", missing.join(", "))]
    IncompleteInterview { missing: Vec<String> },

    #[error("Invalid answer for {field}: {reason}")]
    InvalidAnswer { field: String, reason: String },

    #[error("Conversation not complete, stopped at step {step}")]
    NotComplete { step: usize },
}

/// Notification delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notifier {name} failed to build message: {reason}")]
    BuildFailed { name: String, reason: String },

    #[error("Notifier {name} failed to deliver: {reason}")]
    SendFailed { name: String, reason: String },
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
