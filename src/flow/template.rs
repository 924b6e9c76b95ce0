//! `{field}` placeholder substitution for prompts and success messages.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::answers::CollectedAnswers;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex"));

/// Output of [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Placeholders with no matching answer, left verbatim in `text`.
    pub unresolved: Vec<String>,
}

/// Substitute every `{field}` in `template` with the matching answer.
///
/// Unknown placeholders are left untouched and reported in
/// [`Rendered::unresolved`].
pub fn render(template: &str, answers: &CollectedAnswers) -> Rendered {
    let mut unresolved = Vec::new();
    let text = PLACEHOLDER
        .replace_all(template, |caps: &Captures| match answers.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => {
                unresolved.push(caps[1].to_string());
                caps[0].to_string()
            }
        })
        .into_owned();
    Rendered { text, unresolved }
}

/// Field names referenced by `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}
