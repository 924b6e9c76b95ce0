//! Lead scoring data model.

use serde::{Deserialize, Serialize};

use super::REQUIRED_FIELDS;
use super::pricing::PricingRecommendation;
use crate::error::ScoringError;
use crate::flow::answers::{AnswerValue, CollectedAnswers};
use crate::flow::validate::{parse_company_size, parse_day_count};

/// How soon the lead needs help, from the tender deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// high when `0 < days < 30`, medium for `30..=90`, low otherwise
    /// (including "no deadline").
    pub fn from_tender_days(days: u32) -> Self {
        match days {
            1..=29 => Self::High,
            30..=90 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Next step the sales team should take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendedAction {
    #[serde(rename = "BOOK_FREE_CONSULT")]
    BookFreeConsult,
    #[serde(rename = "BUY_50_ASSESSMENT")]
    Buy50Assessment,
    #[serde(rename = "NURTURE")]
    Nurture,
}

impl RecommendedAction {
    pub const CONSULT_THRESHOLD: u8 = 70;
    pub const ASSESSMENT_THRESHOLD: u8 = 40;

    pub fn from_score(score: u8) -> Self {
        if score >= Self::CONSULT_THRESHOLD {
            Self::BookFreeConsult
        } else if score >= Self::ASSESSMENT_THRESHOLD {
            Self::Buy50Assessment
        } else {
            Self::Nurture
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BookFreeConsult => "BOOK_FREE_CONSULT",
            Self::Buy50Assessment => "BUY_50_ASSESSMENT",
            Self::Nurture => "NURTURE",
        }
    }
}

impl std::fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse company size used for scoring and the pricing tier label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeBand {
    Small,
    Medium,
    Large,
}

impl SizeBand {
    pub fn from_employees(count: u32) -> Self {
        match count {
            0..=25 => Self::Small,
            26..=100 => Self::Medium,
            _ => Self::Large,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// The size answer as given: a category or a head count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySize {
    Category(SizeBand),
    Employees(u32),
}

impl CompanySize {
    pub fn band(&self) -> SizeBand {
        match self {
            Self::Category(band) => *band,
            Self::Employees(n) => SizeBand::from_employees(*n),
        }
    }
}

impl std::fmt::Display for CompanySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category(band) => write!(f, "{}", band.as_str()),
            Self::Employees(n) => write!(f, "{n}-employee"),
        }
    }
}

/// Typed view of a completed readiness interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadProfile {
    pub contact_name: String,
    pub company_name: String,
    pub size: CompanySize,
    pub tender_days: u32,
    pub industry: String,
    pub current_esg_status: String,
    pub pain_points: String,
    pub email: Option<String>,
}

impl LeadProfile {
    /// Interpret raw answers. Missing required fields are reported together;
    /// a present field that cannot be read is reported on its own.
    pub fn from_answers(answers: &CollectedAnswers) -> Result<Self, ScoringError> {
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|f| !answers.contains(f))
            .map(|f| f.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ScoringError::IncompleteInterview { missing });
        }

        Ok(Self {
            contact_name: text(answers, "contact_name")?,
            company_name: text(answers, "company_name")?,
            size: company_size(answers)?,
            tender_days: tender_days(answers)?,
            industry: text(answers, "industry")?,
            current_esg_status: text(answers, "current_esg_status")?,
            pain_points: text(answers, "pain_points")?,
            email: answers
                .get("email")
                .and_then(AnswerValue::as_text)
                .map(String::from),
        })
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ScoringError {
    ScoringError::InvalidAnswer {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn text(answers: &CollectedAnswers, field: &str) -> Result<String, ScoringError> {
    match answers.get(field) {
        Some(AnswerValue::Text(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(AnswerValue::Text(_)) => Err(invalid(field, "empty answer")),
        Some(AnswerValue::Number(n)) => Ok(n.to_string()),
        None => Err(ScoringError::IncompleteInterview {
            missing: vec![field.to_string()],
        }),
    }
}

fn tender_days(answers: &CollectedAnswers) -> Result<u32, ScoringError> {
    match answers.get("tender_days") {
        Some(AnswerValue::Number(n)) => Ok(*n),
        Some(AnswerValue::Text(s)) => parse_day_count(s)
            .ok_or_else(|| invalid("tender_days", format!("not a day count: {s:?}"))),
        None => Err(ScoringError::IncompleteInterview {
            missing: vec!["tender_days".into()],
        }),
    }
}

fn company_size(answers: &CollectedAnswers) -> Result<CompanySize, ScoringError> {
    let parsed = match answers.get("size") {
        Some(AnswerValue::Number(0)) => None,
        Some(AnswerValue::Number(n)) => Some(AnswerValue::Number(*n)),
        Some(AnswerValue::Text(s)) => parse_company_size(s),
        None => {
            return Err(ScoringError::IncompleteInterview {
                missing: vec!["size".into()],
            });
        }
    };
    match parsed {
        Some(AnswerValue::Number(n)) => Ok(CompanySize::Employees(n)),
        Some(AnswerValue::Text(category)) => match category.as_str() {
            "small" => Ok(CompanySize::Category(SizeBand::Small)),
            "medium" => Ok(CompanySize::Category(SizeBand::Medium)),
            _ => Ok(CompanySize::Category(SizeBand::Large)),
        },
        None => Err(invalid("size", "expected small, medium, large or an employee count")),
    }
}

/// Points awarded by each additive term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub tender: u8,
    pub size: u8,
    pub maturity: u8,
    pub industry: u8,
}

impl ScoreBreakdown {
    /// Sum of all terms, capped at 100.
    pub fn total(&self) -> u8 {
        let sum = self.tender as u16 + self.size as u16 + self.maturity as u16 + self.industry as u16;
        sum.min(100) as u8
    }
}

/// Outcome of scoring one lead. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub urgency: Urgency,
    pub action: RecommendedAction,
    pub lead_brief: String,
    pub focus_points: Vec<String>,
    pub opening_questions: Vec<String>,
    pub pricing_recommendation: PricingRecommendation,
    pub breakdown: ScoreBreakdown,
}
