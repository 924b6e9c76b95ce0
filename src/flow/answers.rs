//! Collected answers: the normalised values a conversation has accepted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A normalised answer value.
///
/// Serialised untagged, so an answers map reads naturally as JSON:
/// `{"size": "large", "tender_days": 10}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(u32),
    Text(String),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u32> for AnswerValue {
    fn from(n: u32) -> Self {
        Self::Number(n)
    }
}

/// Field name → normalised value.
///
/// Only grows: there is no removal operation. Keys are kept sorted so
/// serialised snapshots are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectedAnswers(BTreeMap<String, AnswerValue>);

impl CollectedAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer for `field`.
    pub fn record(&mut self, field: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style [`record`](Self::record), handy for fixtures.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.record(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
