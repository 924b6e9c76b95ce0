//! Lead scoring. Turns a completed readiness interview into a score,
//! urgency tier, recommended action, pricing recommendation and the text
//! the sales team reads.

pub mod engine;
pub mod model;
pub mod pricing;
pub mod rules;

pub use engine::LeadScorer;
pub use model::{
    CompanySize, LeadProfile, RecommendedAction, ScoreBreakdown, ScoreResult, SizeBand, Urgency,
};
pub use pricing::{Commission, PricingRecommendation, PricingTable, Sku, SkuRecommendation};
pub use rules::{KeywordRule, MaturityBucket, MaturityRule, ScoringRules};

/// Answers the scorer cannot do without.
pub const REQUIRED_FIELDS: &[&str] = &[
    "contact_name",
    "company_name",
    "size",
    "tender_days",
    "industry",
    "current_esg_status",
    "pain_points",
];
