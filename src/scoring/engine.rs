//! Deterministic lead scoring.

use tracing::info;

use super::model::{
    LeadProfile, RecommendedAction, ScoreBreakdown, ScoreResult, SizeBand, Urgency,
};
use super::pricing::PricingTable;
use super::rules::ScoringRules;
use crate::error::ScoringError;
use crate::flow::answers::CollectedAnswers;
use crate::flow::state::ConversationState;

const MAX_FOCUS_POINTS: usize = 5;
const MAX_OPENING_QUESTIONS: usize = 5;

/// Pure function from a completed interview to a [`ScoreResult`].
///
/// Holds only immutable rule data, so one instance can be shared behind an
/// `Arc` by every request.
#[derive(Debug, Clone, Default)]
pub struct LeadScorer {
    rules: ScoringRules,
    pricing: PricingTable,
}

impl LeadScorer {
    pub fn new(rules: ScoringRules, pricing: PricingTable) -> Self {
        Self { rules, pricing }
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    /// Score a finished conversation. Refuses one that has not reached the
    /// end of its flow.
    pub fn score_conversation(&self, state: &ConversationState) -> Result<ScoreResult, ScoringError> {
        if !state.is_complete {
            return Err(ScoringError::NotComplete {
                step: state.current_step,
            });
        }
        self.score(&state.answers)
    }

    /// Score a raw answer set.
    pub fn score(&self, answers: &CollectedAnswers) -> Result<ScoreResult, ScoringError> {
        let profile = LeadProfile::from_answers(answers)?;
        Ok(self.score_profile(&profile))
    }

    pub fn score_profile(&self, lead: &LeadProfile) -> ScoreResult {
        let maturity = self.rules.maturity(&lead.current_esg_status);
        let high_exposure = self.rules.is_high_exposure(&lead.industry);

        let breakdown = ScoreBreakdown {
            tender: tender_points(lead.tender_days),
            size: size_points(lead.size.band()),
            maturity: maturity.points(),
            industry: if high_exposure { 5 } else { 0 },
        };
        let score = breakdown.total();
        let urgency = Urgency::from_tender_days(lead.tender_days);
        let action = RecommendedAction::from_score(score);

        let mut focus_points = Vec::new();
        match urgency {
            Urgency::High => focus_points.push(format!(
                "Urgent tender deadline in {} days - expedited support available",
                lead.tender_days
            )),
            Urgency::Medium => focus_points.push(format!(
                "Tender deadline in {} days - plan evidence gathering now",
                lead.tender_days
            )),
            Urgency::Low => {}
        }
        focus_points.push(format!(
            "ESG strategy for a {} {} company",
            lead.size, lead.industry
        ));
        focus_points.push(maturity.focus_point().to_string());
        focus_points.extend(
            self.rules
                .pain_point_hits(&lead.pain_points)
                .map(|rule| rule.focus_point.clone()),
        );
        if score >= RecommendedAction::CONSULT_THRESHOLD {
            focus_points.push("High-intent lead - prioritise a free consultation".to_string());
        }
        focus_points.truncate(MAX_FOCUS_POINTS);

        let mut opening_questions = Vec::new();
        if lead.tender_days > 0 {
            opening_questions
                .push("Tell me more about your tender requirements and key deliverables?".to_string());
        }
        opening_questions.extend([
            format!(
                "What specific ESG requirements does {} need to meet?",
                lead.company_name
            ),
            "Do you have any existing ESG data or measurement systems in place?".to_string(),
            "What's your timeline for achieving ESG compliance?".to_string(),
            "Which matters more to your buyers: an EcoVadis rating or B Corp certification?"
                .to_string(),
            "Who in the business will own the ESG programme day to day?".to_string(),
        ]);
        opening_questions.truncate(MAX_OPENING_QUESTIONS);

        let tender_clause = if lead.tender_days > 0 {
            format!("Has a tender due in {} days. ", lead.tender_days)
        } else {
            String::new()
        };
        let lead_brief = format!(
            "{} from {} ({} {} company) is seeking ESG support. {}Current ESG status: {}. \
             Main concerns: {}. Score {}/100 with {} urgency. Recommended action: {}.",
            lead.contact_name,
            lead.company_name,
            lead.size,
            lead.industry,
            tender_clause,
            lead.current_esg_status,
            lead.pain_points,
            score,
            urgency,
            action,
        );

        info!(
            company = %lead.company_name,
            score,
            urgency = %urgency,
            action = %action,
            "Lead scored"
        );

        ScoreResult {
            score,
            urgency,
            action,
            lead_brief,
            focus_points,
            opening_questions,
            pricing_recommendation: self.pricing.recommend(&lead.size),
            breakdown,
        }
    }
}

fn tender_points(days: u32) -> u8 {
    match days {
        0 => 0,
        1..=29 => 40,
        30..=90 => 25,
        _ => 10,
    }
}

fn size_points(band: SizeBand) -> u8 {
    match band {
        SizeBand::Small => 10,
        SizeBand::Medium => 20,
        SizeBand::Large => 30,
    }
}
