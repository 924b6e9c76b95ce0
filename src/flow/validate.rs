//! Answer validation and normalisation rules.
//!
//! Each step carries one [`AnswerRule`]. Rules are plain data so the
//! question tables stay declarative; all of them are total functions that
//! return a [`Validation`] and never panic on user input.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::answers::{AnswerValue, CollectedAnswers};
use super::template;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex")
});

/// Words accepted as "no deadline" for a day-count answer.
const NO_DEADLINE: &[&str] = &["no", "none", "n/a", "na"];

/// Outcome of validating one raw answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Accepted; store `value`.
    Valid { value: AnswerValue },
    /// Rejected; re-prompt with `message`.
    Invalid { message: String },
    /// An informational branch: show `message`, then the same step again.
    Detour { message: String },
}

/// One multiple-choice option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// When set, picking this option shows the text instead of storing a value.
    #[serde(skip)]
    pub explainer: Option<String>,
}

impl ChoiceOption {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            icon: None,
            explainer: None,
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn with_explainer(mut self, text: &str) -> Self {
        self.explainer = Some(text.to_string());
        self
    }
}

/// A free-text phrase that maps onto an option value.
#[derive(Debug, Clone)]
pub struct Synonym {
    /// Lowercase phrase as written in the table.
    pub phrase: String,
    /// Compiled case-insensitive matcher.
    regex: Regex,
    /// Canonical option value this phrase selects.
    pub value: String,
}

impl Synonym {
    /// The whole (trimmed) answer must equal `phrase`.
    pub fn exact(phrase: &str, value: &str) -> Self {
        Self::build(phrase, value, format!("(?i)^{}$", regex::escape(phrase)))
    }

    /// `phrase` must appear as whole words somewhere in the answer.
    pub fn contains(phrase: &str, value: &str) -> Self {
        Self::build(
            phrase,
            value,
            format!("(?i)(?:^|[^a-z0-9]){}(?:$|[^a-z0-9])", regex::escape(phrase)),
        )
    }

    fn build(phrase: &str, value: &str, pattern: String) -> Self {
        Self {
            phrase: phrase.to_lowercase(),
            regex: Regex::new(&pattern).expect("escaped synonym pattern"),
            value: value.to_string(),
        }
    }

    pub fn matches(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

/// Validation rule attached to a question step.
#[derive(Debug, Clone)]
pub enum AnswerRule {
    /// Free text of at least `min_len` characters after trimming.
    Text { min_len: usize, message: String },
    /// A non-negative day count, or a "no deadline" word meaning 0.
    DayCount { message: String },
    /// `small`/`medium`/`large` (or `s`/`m`/`l`), or an employee count.
    CompanySize { message: String },
    /// One of the step's options, matched through the synonym table.
    /// Unmatched input is rejected with `message` followed by the choices.
    Choice { synonyms: Vec<Synonym>, message: String },
    /// A `local@domain.tld` address.
    Email { message: String },
}

impl AnswerRule {
    pub fn text(min_len: usize, message: &str) -> Self {
        Self::Text {
            min_len,
            message: message.to_string(),
        }
    }

    pub fn day_count(message: &str) -> Self {
        Self::DayCount {
            message: message.to_string(),
        }
    }

    pub fn company_size(message: &str) -> Self {
        Self::CompanySize {
            message: message.to_string(),
        }
    }

    pub fn choice(synonyms: Vec<Synonym>, message: &str) -> Self {
        Self::Choice {
            synonyms,
            message: message.to_string(),
        }
    }

    pub fn email(message: &str) -> Self {
        Self::Email {
            message: message.to_string(),
        }
    }

    /// Validate `raw` for a step offering `options`.
    ///
    /// `answers` is used to render `{field}` placeholders in rejection
    /// messages.
    pub fn validate(
        &self,
        raw: &str,
        options: &[ChoiceOption],
        answers: &CollectedAnswers,
    ) -> Validation {
        let input = raw.trim();
        let reject = |message: &str| Validation::Invalid {
            message: template::render(message, answers).text,
        };

        match self {
            Self::Text { min_len, message } => {
                if input.chars().count() < *min_len {
                    reject(message)
                } else {
                    Validation::Valid {
                        value: AnswerValue::Text(input.to_string()),
                    }
                }
            }
            Self::DayCount { message } => match parse_day_count(input) {
                Some(days) => Validation::Valid {
                    value: AnswerValue::Number(days),
                },
                None => reject(message),
            },
            Self::CompanySize { message } => match parse_company_size(input) {
                Some(value) => Validation::Valid { value },
                None => reject(message),
            },
            Self::Choice { synonyms, message } => match match_choice(input, options, synonyms) {
                Some(option) => match &option.explainer {
                    Some(text) => Validation::Detour {
                        message: template::render(text, answers).text,
                    },
                    None => Validation::Valid {
                        value: AnswerValue::Text(option.value.clone()),
                    },
                },
                None => {
                    let choices = options
                        .iter()
                        .map(|o| o.label.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    Validation::Invalid {
                        message: format!(
                            "{} Choose one of: {choices}.",
                            template::render(message, answers).text
                        ),
                    }
                }
            },
            Self::Email { message } => {
                if EMAIL.is_match(input) {
                    Validation::Valid {
                        value: AnswerValue::Text(input.to_lowercase()),
                    }
                } else {
                    reject(message)
                }
            }
        }
    }
}

/// Parse a day count: "no"/"none"/"n/a" → 0, otherwise a leading
/// non-negative integer ("45 days" → 45).
pub fn parse_day_count(input: &str) -> Option<u32> {
    let normalized = input.trim().to_lowercase();
    if NO_DEADLINE.contains(&normalized.as_str()) {
        return Some(0);
    }
    let digits: String = normalized
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Parse a company size answer into a canonical category or employee count.
pub fn parse_company_size(input: &str) -> Option<AnswerValue> {
    let normalized = input.trim().to_lowercase();
    let category = match normalized.as_str() {
        "small" | "s" => "small",
        "medium" | "m" => "medium",
        "large" | "l" => "large",
        _ => {
            return parse_day_count(&normalized)
                .filter(|n| *n > 0 && normalized.starts_with(|c: char| c.is_ascii_digit()))
                .map(AnswerValue::Number);
        }
    };
    Some(AnswerValue::Text(category.to_string()))
}

fn match_choice<'a>(
    input: &str,
    options: &'a [ChoiceOption],
    synonyms: &[Synonym],
) -> Option<&'a ChoiceOption> {
    if input.is_empty() {
        return None;
    }
    let exact = options.iter().find(|o| {
        o.value.eq_ignore_ascii_case(input) || o.label.to_lowercase() == input.to_lowercase()
    });
    if exact.is_some() {
        return exact;
    }
    let value = &synonyms.iter().find(|s| s.matches(input))?.value;
    options.iter().find(|o| &o.value == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yes_no() -> (Vec<ChoiceOption>, AnswerRule) {
        let options = vec![ChoiceOption::new("Yes", "yes"), ChoiceOption::new("No", "no")];
        let rule = AnswerRule::choice(
            vec![
                Synonym::exact("y", "yes"),
                Synonym::exact("n", "no"),
                Synonym::contains("yes", "yes"),
                Synonym::contains("no", "no"),
            ],
            "Please answer Yes or No.",
        );
        (options, rule)
    }

    #[test]
    fn text_enforces_minimum_after_trim() {
        let rule = AnswerRule::text(2, "Please provide your name.");
        let answers = CollectedAnswers::new();
        assert_eq!(
            rule.validate("  J ", &[], &answers),
            Validation::Invalid {
                message: "Please provide your name.".into()
            }
        );
        assert_eq!(
            rule.validate("  Jo ", &[], &answers),
            Validation::Valid {
                value: AnswerValue::Text("Jo".into())
            }
        );
    }

    #[test]
    fn text_counts_characters_not_bytes() {
        let rule = AnswerRule::text(3, "too short");
        assert!(matches!(
            rule.validate("éé", &[], &CollectedAnswers::new()),
            Validation::Invalid { .. }
        ));
    }

    #[test]
    fn day_count_synonyms_mean_zero() {
        for word in ["no", "None", " N/A ", "na"] {
            assert_eq!(parse_day_count(word), Some(0), "{word}");
        }
    }

    #[test]
    fn day_count_parses_leading_integer() {
        assert_eq!(parse_day_count("45"), Some(45));
        assert_eq!(parse_day_count("30 days"), Some(30));
        assert_eq!(parse_day_count("0"), Some(0));
    }

    #[test]
    fn day_count_rejects_negative_and_text() {
        assert_eq!(parse_day_count("-5"), None);
        assert_eq!(parse_day_count("soon"), None);
        assert_eq!(parse_day_count(""), None);
        assert_eq!(parse_day_count("99999999999"), None);
    }

    #[test]
    fn company_size_accepts_categories_and_counts() {
        assert_eq!(parse_company_size("S"), Some(AnswerValue::Text("small".into())));
        assert_eq!(parse_company_size("Medium"), Some(AnswerValue::Text("medium".into())));
        assert_eq!(parse_company_size("l"), Some(AnswerValue::Text("large".into())));
        assert_eq!(parse_company_size("40"), Some(AnswerValue::Number(40)));
        assert_eq!(parse_company_size("120 employees"), Some(AnswerValue::Number(120)));
    }

    #[test]
    fn company_size_rejects_other_input() {
        assert_eq!(parse_company_size("huge"), None);
        assert_eq!(parse_company_size("0"), None);
        assert_eq!(parse_company_size("no"), None);
        assert_eq!(parse_company_size(""), None);
    }

    #[test]
    fn choice_matches_value_label_and_synonyms() {
        let (options, rule) = yes_no();
        let answers = CollectedAnswers::new();
        for input in ["yes", "YES", "Yes", "y", "yes, definitely"] {
            assert_eq!(
                rule.validate(input, &options, &answers),
                Validation::Valid {
                    value: AnswerValue::Text("yes".into())
                },
                "{input}"
            );
        }
        assert_eq!(
            rule.validate("no thanks", &options, &answers),
            Validation::Valid {
                value: AnswerValue::Text("no".into())
            }
        );
    }

    #[test]
    fn choice_synonyms_match_whole_words_only() {
        let (options, rule) = yes_no();
        // "nobody" contains "no" but not as a word
        assert!(matches!(
            rule.validate("nobody knows", &options, &CollectedAnswers::new()),
            Validation::Invalid { .. }
        ));
    }

    #[test]
    fn choice_rejection_lists_options() {
        let (options, rule) = yes_no();
        match rule.validate("perhaps", &options, &CollectedAnswers::new()) {
            Validation::Invalid { message } => {
                assert_eq!(message, "Please answer Yes or No. Choose one of: Yes, No.");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn choice_option_with_explainer_detours() {
        let options = vec![
            ChoiceOption::new("EcoVadis", "ecovadis"),
            ChoiceOption::new("What's the difference?", "explain")
                .with_explainer("B Corp is a badge; EcoVadis is a scorecard."),
        ];
        let rule = AnswerRule::choice(
            vec![Synonym::contains("difference", "explain")],
            "Pick one.",
        );
        assert_eq!(
            rule.validate("what is the difference", &options, &CollectedAnswers::new()),
            Validation::Detour {
                message: "B Corp is a badge; EcoVadis is a scorecard.".into()
            }
        );
    }

    #[test]
    fn email_shape() {
        let rule = AnswerRule::email("Please enter a valid email address.");
        let answers = CollectedAnswers::new();
        assert_eq!(
            rule.validate(" Jo@Acme.co.uk ", &[], &answers),
            Validation::Valid {
                value: AnswerValue::Text("jo@acme.co.uk".into())
            }
        );
        for bad in ["jo", "jo@acme", "@acme.com", "jo @acme.com", ""] {
            assert!(
                matches!(rule.validate(bad, &[], &answers), Validation::Invalid { .. }),
                "{bad}"
            );
        }
    }

    #[test]
    fn rejection_message_is_templated() {
        let rule = AnswerRule::text(2, "Tell us about {company_name}.");
        let answers = CollectedAnswers::new().with("company_name", "Acme");
        assert_eq!(
            rule.validate("", &[], &answers),
            Validation::Invalid {
                message: "Tell us about Acme.".into()
            }
        );
    }
}
