//! Built-in questionnaires.
//!
//! The tables here are constructed once at startup by
//! [`FlowCatalog::builtin`] and handed to whoever needs them; nothing looks
//! them up globally.

use serde::{Deserialize, Serialize};

use super::engine::QuestionFlow;
use super::step::QuestionStep;
use super::validate::{AnswerRule, ChoiceOption, Synonym};
use crate::error::FlowError;

/// The questionnaires the site offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// The scored lead-qualification interview.
    Readiness,
    /// "How far do you need to go out of the gate?" EcoVadis rating questions.
    Ecovadis,
    /// "B Corp or EcoVadis?" decision questions.
    Bcorp,
}

impl FlowKind {
    pub const ALL: [FlowKind; 3] = [Self::Readiness, Self::Ecovadis, Self::Bcorp];

    pub fn estimated_time(&self) -> &'static str {
        match self {
            Self::Readiness => "2-3 minutes",
            Self::Ecovadis | Self::Bcorp => "4-5 minutes",
        }
    }

    /// Whether completing this flow produces a lead score.
    pub fn is_scored(&self) -> bool {
        matches!(self, Self::Readiness)
    }
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Readiness => "readiness",
            Self::Ecovadis => "ecovadis",
            Self::Bcorp => "bcorp",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for FlowKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "readiness" => Ok(Self::Readiness),
            "ecovadis" => Ok(Self::Ecovadis),
            "bcorp" => Ok(Self::Bcorp),
            other => Err(format!("unknown flow: {other}")),
        }
    }
}

/// All flows, built once.
#[derive(Debug, Clone)]
pub struct FlowCatalog {
    readiness: QuestionFlow,
    ecovadis: QuestionFlow,
    bcorp: QuestionFlow,
}

impl FlowCatalog {
    /// Build and check every built-in flow.
    pub fn builtin() -> Result<Self, FlowError> {
        Ok(Self {
            readiness: QuestionFlow::new(FlowKind::Readiness, readiness_steps())?,
            ecovadis: QuestionFlow::new(FlowKind::Ecovadis, ecovadis_steps())?,
            bcorp: QuestionFlow::new(FlowKind::Bcorp, bcorp_steps())?,
        })
    }

    pub fn get(&self, kind: FlowKind) -> &QuestionFlow {
        match kind {
            FlowKind::Readiness => &self.readiness,
            FlowKind::Ecovadis => &self.ecovadis,
            FlowKind::Bcorp => &self.bcorp,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionFlow> {
        FlowKind::ALL.into_iter().map(|k| self.get(k))
    }
}

// ── Shared option sets ──────────────────────────────────────────────

fn yes_no_options(yes: &str, no: &str) -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new(yes, "yes").with_icon("✅"),
        ChoiceOption::new(no, "no").with_icon("❌"),
    ]
}

fn yes_no_synonyms(extra_yes: &[&str], extra_no: &[&str]) -> Vec<Synonym> {
    let mut synonyms = vec![Synonym::exact("y", "yes"), Synonym::exact("n", "no")];
    synonyms.extend(
        ["yes"]
            .iter()
            .chain(extra_yes)
            .map(|p| Synonym::contains(p, "yes")),
    );
    synonyms.extend(["no"].iter().chain(extra_no).map(|p| Synonym::contains(p, "no")));
    synonyms
}

const YES_NO: &str = "Please answer Yes or No.";

// ── Readiness interview ─────────────────────────────────────────────

const CERTIFICATION_EXPLAINER: &str = "B Corp is a whole-company certification that \
signals purpose-driven leadership to consumers, employees and investors; it needs a legal \
change to your Articles and typically takes 12-24 months. EcoVadis is a sustainability \
rating (Bronze to Platinum, scored 0-100 and refreshed annually) that procurement teams \
and large buyers ask for, and usually takes 6-12 months. Which would you like to focus on?";

fn readiness_steps() -> Vec<QuestionStep> {
    vec![
        QuestionStep::new(
            "contact_name",
            "What's your name?",
            AnswerRule::text(2, "Please provide your name."),
        ),
        QuestionStep::new(
            "company_name",
            "Great to meet you, {contact_name}! What's your company name?",
            AnswerRule::text(2, "Please provide your company name."),
        ),
        QuestionStep::new(
            "size",
            "How would you describe {company_name}'s size? (small, medium, large, or an employee count)",
            AnswerRule::company_size("Please specify small, medium, large, or a number of employees."),
        )
        .with_options(vec![
            ChoiceOption::new("Small", "small").with_icon("🏠"),
            ChoiceOption::new("Medium", "medium").with_icon("🏢"),
            ChoiceOption::new("Large", "large").with_icon("🏭"),
        ]),
        QuestionStep::new(
            "tender_days",
            "Do you have an upcoming tender or deadline? If so, how many days until it's due? \
             (Enter a number, or type 'no' if not applicable)",
            AnswerRule::day_count("Please enter the number of days, or type 'no' if not applicable."),
        ),
        QuestionStep::new(
            "industry",
            "What industry is {company_name} in?",
            AnswerRule::text(2, "Please tell us your industry."),
        ),
        QuestionStep::new(
            "current_esg_status",
            "What's your current ESG status? (e.g., just starting, have some measures, \
             fully compliant, or not sure)",
            AnswerRule::text(3, "Please describe your current ESG status."),
        ),
        QuestionStep::new(
            "certification_interest",
            "Which certification are you most interested in?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("difference", "explain"),
                    Synonym::contains("what is", "explain"),
                    Synonym::contains("both", "both"),
                    Synonym::contains("b corp", "bcorp"),
                    Synonym::contains("bcorp", "bcorp"),
                    Synonym::contains("ecovadis", "ecovadis"),
                    Synonym::contains("not sure", "unsure"),
                    Synonym::contains("unsure", "unsure"),
                ],
                "Please pick a certification.",
            ),
        )
        .with_explanation("Not sure? Ask us what the difference is before you choose.")
        .with_options(vec![
            ChoiceOption::new("EcoVadis", "ecovadis").with_icon("🏅"),
            ChoiceOption::new("B Corp", "bcorp").with_icon("🌍"),
            ChoiceOption::new("Both", "both").with_icon("🤝"),
            ChoiceOption::new("Not sure yet", "unsure").with_icon("🤔"),
            ChoiceOption::new("What's the difference?", "explain")
                .with_icon("❓")
                .with_explainer(CERTIFICATION_EXPLAINER),
        ])
        .with_success("Great choice! 👍"),
        QuestionStep::new(
            "pain_points",
            "What are your main challenges or concerns around ESG compliance?",
            AnswerRule::text(5, "Please share your main ESG challenges or concerns."),
        ),
        QuestionStep::new(
            "email",
            "Finally, {contact_name}, what's the best email address to send your assessment to?",
            AnswerRule::email("Please enter a valid email address (like name@company.com)."),
        )
        .with_success("Thank you! We'll be in touch at {email}."),
    ]
}

// ── EcoVadis questionnaire ──────────────────────────────────────────

fn ecovadis_steps() -> Vec<QuestionStep> {
    vec![
        QuestionStep::new(
            "uk_government_buyer",
            "Is the buyer a UK central government/NHS body (or prime supplier to them)?",
            AnswerRule::choice(yes_no_synonyms(&[], &[]), YES_NO),
        )
        .with_explanation(
            "UK government and NHS contracts often have specific ESG requirements. This helps \
             us determine the expected rating level.",
        )
        .with_options(yes_no_options("Yes", "No"))
        .with_success("Got it! 👍"),
        QuestionStep::new(
            "critical_role",
            "Is your role as a critical supplier / high-impact goods or services?",
            AnswerRule::choice(yes_no_synonyms(&["critical"], &["standard"]), YES_NO),
        )
        .with_explanation(
            "Critical suppliers to government/NHS typically need Gold rating, while \
             non-critical roles need minimum Silver.",
        )
        .with_options(yes_no_options("Yes - Critical/High-impact", "No - Standard role"))
        .with_success("Thank you! 📊"),
        QuestionStep::new(
            "contract_value",
            "Is the annual contract value ≥£100-250k OR is the buyer a Tier-1 multinational \
             with formal supplier ESG ratings?",
            AnswerRule::choice(yes_no_synonyms(&[], &[]), YES_NO),
        )
        .with_explanation(
            "High-value contracts and Tier-1 multinationals typically require more \
             comprehensive ESG documentation.",
        )
        .with_options(yes_no_options("Yes", "No"))
        .with_success("Noted! 💰"),
        QuestionStep::new(
            "tier1_critical_category",
            "Are you a Tier-1 (direct) supplier for a critical or regulated category?",
            AnswerRule::choice(yes_no_synonyms(&["tier-1", "tier 1", "critical"], &[]), YES_NO),
        )
        .with_explanation(
            "Examples: healthcare, food, electronics, chemicals, logistics at scale. Direct \
             suppliers in these sectors typically need Gold rating.",
        )
        .with_options(yes_no_options("Yes - Tier-1 critical", "No"))
        .with_success("Perfect! 🎯"),
        QuestionStep::new(
            "higher_risk_sector",
            "Is your sector higher-risk for environmental/labour/ethics?",
            AnswerRule::choice(yes_no_synonyms(&["higher"], &["standard"]), YES_NO),
        )
        .with_explanation(
            "Examples: agriculture, apparel, electronics, chemicals, logistics. These sectors \
             typically need Silver with expectation towards Gold.",
        )
        .with_options(yes_no_options("Yes - Higher risk", "No - Standard risk"))
        .with_success("Thanks! ⚠️"),
        QuestionStep::new(
            "buyer_scorecard_reference",
            "Does the buyer reference supplier scorecards/ratings/benchmarking?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("not sure", "unsure"),
                    Synonym::contains("unsure", "unsure"),
                    Synonym::contains("no mention", "no"),
                    Synonym::exact("y", "yes"),
                    Synonym::exact("n", "no"),
                    Synonym::contains("yes", "yes"),
                    Synonym::contains("mention", "yes"),
                    Synonym::contains("no", "no"),
                ],
                "Please select one of the options.",
            ),
        )
        .with_explanation(
            "E.g., 'validation of compliance', 'improvement', 'peer benchmarking', 'annual \
             score review' - even if no specific model is stated. Indicates minimum Silver \
             expectation.",
        )
        .with_options(vec![
            ChoiceOption::new("Yes - They mention scorecards", "yes").with_icon("✅"),
            ChoiceOption::new("No mention", "no").with_icon("❌"),
            ChoiceOption::new("Not sure", "unsure").with_icon("🤔"),
        ])
        .with_success("Got it! 📋"),
        QuestionStep::new(
            "sme_strong_governance",
            "Are you an SME (sub-250 employees) with strong policies, KPIs, governance \
             oversight, and supply-chain controls already in place?",
            AnswerRule::choice(yes_no_synonyms(&["strong"], &["building"]), YES_NO),
        )
        .with_explanation(
            "Agile SMEs with mature ESG practices can often target Gold rating directly. If \
             yes, we'll recommend stretching for Gold.",
        )
        .with_options(yes_no_options("Yes - Strong systems", "No - Still building"))
        .with_success("Excellent! 💪"),
        QuestionStep::new(
            "tender_timeline_months",
            "Is the tender 6-9 months away?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("6-9", "yes"),
                    Synonym::contains("less", "under_6"),
                    Synonym::contains("under", "under_6"),
                    Synonym::contains("more", "over_9"),
                    Synonym::contains("over", "over_9"),
                    Synonym::contains("not yet", "no_tender"),
                    Synonym::contains("no tender", "no_tender"),
                    Synonym::contains("yes", "yes"),
                    Synonym::contains("no", "no_tender"),
                ],
                "Please select one of the timeline options.",
            ),
        )
        .with_explanation(
            "Longer timelines allow for more ambitious targets. With 6-9 months, you can aim \
             for Gold if you have some systems in place.",
        )
        .with_options(vec![
            ChoiceOption::new("Yes - 6-9 months", "yes").with_icon("✅"),
            ChoiceOption::new("Less than 6 months", "under_6").with_icon("⏱️"),
            ChoiceOption::new("More than 9 months", "over_9").with_icon("📅"),
            ChoiceOption::new("No tender yet", "no_tender").with_icon("❌"),
        ])
        .with_success("Perfect timing info! ⏰"),
        QuestionStep::new(
            "current_maturity",
            "What's your current ESG maturity level?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("policies", "policies_only"),
                    Synonym::contains("kpis", "kpis_controls"),
                    Synonym::contains("controls", "kpis_controls"),
                    Synonym::contains("comprehensive", "comprehensive"),
                    Synonym::contains("systems", "comprehensive"),
                    Synonym::contains("starting", "starting"),
                    Synonym::contains("just", "starting"),
                ],
                "Please select one of the maturity levels.",
            ),
        )
        .with_explanation(
            "This helps us recommend the right target rating. Policies-only typically means \
             Silver target; KPIs + supply-chain controls can target Gold.",
        )
        .with_options(vec![
            ChoiceOption::new("Policies only", "policies_only").with_icon("📄"),
            ChoiceOption::new("KPIs + some controls", "kpis_controls").with_icon("📊"),
            ChoiceOption::new("Comprehensive systems", "comprehensive").with_icon("🏆"),
            ChoiceOption::new("Just starting", "starting").with_icon("🌱"),
        ])
        .with_success("Thanks for that context! 🎯"),
        QuestionStep::new(
            "target_rating_preference",
            "Based on your answers, what rating do you think you'll need?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("bronze", "bronze"),
                    Synonym::contains("silver", "silver"),
                    Synonym::contains("gold", "gold"),
                    Synonym::contains("unsure", "unsure"),
                    Synonym::contains("not sure", "unsure"),
                ],
                "Please pick a target rating.",
            ),
        )
        .with_explanation(
            "We'll provide our recommendation, but it's helpful to know what you're aiming \
             for or what the buyer expects.",
        )
        .with_options(vec![
            ChoiceOption::new("Bronze (Basic compliance)", "bronze").with_icon("🥉"),
            ChoiceOption::new("Silver (Good performance)", "silver").with_icon("🥈"),
            ChoiceOption::new("Gold (Excellence)", "gold").with_icon("🥇"),
            ChoiceOption::new("Not sure yet", "unsure").with_icon("🤔"),
        ])
        .with_success("Perfect! We'll factor that in. 🎯"),
        QuestionStep::new(
            "budget_awareness",
            "Have you allocated budget for EcoVadis certification?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("approved", "approved"),
                    Synonym::contains("yes", "approved"),
                    Synonym::contains("discuss", "discussing"),
                    Synonym::contains("discussion", "discussing"),
                    Synonym::contains("proposal", "need_proposal"),
                    Synonym::contains("not yet", "not_yet"),
                    Synonym::contains("not", "not_yet"),
                    Synonym::contains("no", "not_yet"),
                ],
                "Please pick one of the budget options.",
            ),
        )
        .with_explanation(
            "Our introductory bundle is £2,400 including gap analysis, 8×2-hour expert \
             sessions, and corrective action plan.",
        )
        .with_options(vec![
            ChoiceOption::new("Yes - Budget approved", "approved").with_icon("✅"),
            ChoiceOption::new("In discussion", "discussing").with_icon("💭"),
            ChoiceOption::new("Need proposal first", "need_proposal").with_icon("📋"),
            ChoiceOption::new("Not yet", "not_yet").with_icon("❌"),
        ])
        .with_success("Great! We'll include budget considerations in your assessment. 💰"),
        QuestionStep::new(
            "additional_esg_goals",
            "Are there any other ESG goals or compliance requirements you're working towards?",
            AnswerRule::text(
                3,
                "Please share any additional goals, or type 'none' if not applicable.",
            ),
        )
        .with_explanation(
            "E.g., ISO certifications, Carbon neutrality, B Corp, specific industry \
             standards, etc. This helps us provide holistic recommendations.",
        )
        .with_success("Thank you! That's really helpful context. 🙏"),
    ]
}

// ── B Corp questionnaire ────────────────────────────────────────────

fn bcorp_steps() -> Vec<QuestionStep> {
    vec![
        QuestionStep::new(
            "esg_audience",
            "Who do you most need to demonstrate ESG progress to?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("all", "all"),
                    Synonym::contains("everyone", "all"),
                    Synonym::contains("consumers", "consumers_employees_investors"),
                    Synonym::contains("employees", "consumers_employees_investors"),
                    Synonym::contains("investors", "consumers_employees_investors"),
                    Synonym::contains("procurement", "procurement_corporates"),
                    Synonym::contains("corporates", "procurement_corporates"),
                    Synonym::contains("government", "government_ngos"),
                    Synonym::contains("ngos", "government_ngos"),
                ],
                "Please pick the audience that matters most.",
            ),
        )
        .with_explanation(
            "B Corp resonates with consumers/employees/investors, while EcoVadis is preferred \
             by procurement teams and corporate buyers.",
        )
        .with_options(vec![
            ChoiceOption::new("Consumers, employees, investors", "consumers_employees_investors")
                .with_icon("👥"),
            ChoiceOption::new("Procurement teams, corporates", "procurement_corporates")
                .with_icon("💼"),
            ChoiceOption::new("Government buyers, NGOs", "government_ngos").with_icon("🏛️"),
            ChoiceOption::new("All of the above", "all").with_icon("🌍"),
        ])
        .with_success("Perfect! That helps narrow down the best path for you. 🎯"),
        QuestionStep::new(
            "willing_amend_articles",
            "Are you willing to amend your Articles of Association (legal governance change) \
             to embed purpose into your company structure?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("what", "need_info"),
                    Synonym::contains("involve", "need_info"),
                    Synonym::contains("board", "need_discussion"),
                    Synonym::contains("discuss", "need_discussion"),
                    Synonym::contains("prefer not", "no"),
                    Synonym::contains("ready", "yes"),
                    Synonym::contains("yes", "yes"),
                    Synonym::contains("no", "no"),
                ],
                "Please pick one of the options.",
            ),
        )
        .with_explanation(
            "B Corp requires a legal commitment by amending your Articles to consider \
             stakeholder impact in decision-making.",
        )
        .with_options(vec![
            ChoiceOption::new("Yes - Ready for legal change", "yes").with_icon("✅"),
            ChoiceOption::new("Need to discuss with board", "need_discussion").with_icon("🤔"),
            ChoiceOption::new("No - Prefer not to", "no").with_icon("❌"),
            ChoiceOption::new("What does this involve?", "need_info").with_icon("❓"),
        ])
        .with_success("Thank you for that clarity! 📝"),
        QuestionStep::new(
            "primary_ambition",
            "Is your primary ambition to be seen as a purpose-driven leader with broad \
             cultural impact?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("both", "both"),
                    Synonym::contains("not sure", "unsure"),
                    Synonym::contains("unsure", "unsure"),
                    Synonym::contains("cultural", "yes_cultural"),
                    Synonym::contains("procurement", "no_procurement"),
                    Synonym::contains("yes", "yes_cultural"),
                    Synonym::contains("no", "no_procurement"),
                ],
                "Please pick one of the options.",
            ),
        )
        .with_options(vec![
            ChoiceOption::new("Yes - Cultural transformation", "yes_cultural").with_icon("✅"),
            ChoiceOption::new("No - Focus on procurement credibility", "no_procurement")
                .with_icon("📈"),
            ChoiceOption::new("Both are important", "both").with_icon("🤝"),
            ChoiceOption::new("Not sure yet", "unsure").with_icon("🤔"),
        ])
        .with_success("Great! That helps us recommend the right certification. 🌟"),
        QuestionStep::new(
            "prefer_numeric_scorecard",
            "Do you prefer a certification that gives you a numeric ESG scorecard updated \
             annually and benchmarked against peers?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("not a priority", "not_priority"),
                    Synonym::contains("priority", "not_priority"),
                    Synonym::contains("numeric", "yes"),
                    Synonym::contains("badge", "no"),
                    Synonym::contains("yes", "yes"),
                    Synonym::contains("no", "no"),
                ],
                "Please pick one of the options.",
            ),
        )
        .with_options(vec![
            ChoiceOption::new("Yes - Want numeric scores", "yes").with_icon("✅"),
            ChoiceOption::new("No - Badge is enough", "no").with_icon("❌"),
            ChoiceOption::new("Not a priority", "not_priority").with_icon("🤔"),
        ])
        .with_success("Got it! 📊"),
        QuestionStep::new(
            "budget_both_certifications",
            "Do you have the budget and internal resources to pursue BOTH B Corp and EcoVadis \
             at the same time?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("sequential", "sequential"),
                    Synonym::contains("sequentially", "sequential"),
                    Synonym::contains("one at a time", "sequential"),
                    Synonym::contains("cost", "need_costs"),
                    Synonym::contains("breakdown", "need_costs"),
                    Synonym::contains("prioritize", "no"),
                    Synonym::contains("both", "yes"),
                    Synonym::contains("yes", "yes"),
                    Synonym::contains("no", "no"),
                ],
                "Please pick one of the options.",
            ),
        )
        .with_explanation("Our introductory bundle for each certification is £2,400.")
        .with_options(vec![
            ChoiceOption::new("Yes - Can do both", "yes").with_icon("✅"),
            ChoiceOption::new("No - Need to prioritize", "no").with_icon("❌"),
            ChoiceOption::new("Maybe sequentially", "sequential").with_icon("💭"),
            ChoiceOption::new("Need cost breakdown", "need_costs").with_icon("📋"),
        ])
        .with_success("Thanks for that clarity! 💰"),
        QuestionStep::new(
            "need_quick_result",
            "Do you need a quicker result (6-12 months) to show progress in the market?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("depends", "depends"),
                    Synonym::contains("12-24", "no_patient"),
                    Synonym::contains("quickly", "yes_urgent"),
                    Synonym::contains("urgent", "yes_urgent"),
                    Synonym::contains("yes", "yes_urgent"),
                    Synonym::contains("no", "no_patient"),
                ],
                "Please pick one of the options.",
            ),
        )
        .with_explanation(
            "EcoVadis typically takes 6-12 months from start to certification. B Corp can take \
             12-24 months depending on company readiness and the assessment backlog.",
        )
        .with_options(vec![
            ChoiceOption::new("Yes - Need results quickly", "yes_urgent").with_icon("⏱️"),
            ChoiceOption::new("No - Can take 12-24 months", "no_patient").with_icon("📅"),
            ChoiceOption::new("Depends on the benefits", "depends").with_icon("🤔"),
        ])
        .with_success("Perfect timing info! ⏰"),
        QuestionStep::new(
            "contracts_require_scorecard",
            "Do your current or target contracts require a structured ESG scorecard?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("not sure", "unsure"),
                    Synonym::contains("unsure", "unsure"),
                    Synonym::contains("not explicitly", "not_stated"),
                    Synonym::contains("stated", "not_stated"),
                    Synonym::contains("required", "yes_required"),
                    Synonym::contains("credentials", "no_just_credentials"),
                    Synonym::contains("yes", "yes_required"),
                    Synonym::contains("no", "no_just_credentials"),
                ],
                "Please pick one of the options.",
            ),
        )
        .with_explanation(
            "Examples: NHS Evergreen, PPN 06/21, supplier audits, formal ESG rating \
             requirements. If yes, EcoVadis is typically the standard.",
        )
        .with_options(vec![
            ChoiceOption::new("Yes - Scorecard required", "yes_required").with_icon("✅"),
            ChoiceOption::new("Not explicitly stated", "not_stated").with_icon("💭"),
            ChoiceOption::new("No - Just ESG credentials", "no_just_credentials").with_icon("❌"),
            ChoiceOption::new("Not sure", "unsure").with_icon("🤔"),
        ])
        .with_success("Noted! That's important context. 📋"),
        QuestionStep::new(
            "current_impact_measurement",
            "Do you currently measure and track your social/environmental impact?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("not yet", "not_yet"),
                    Synonym::contains("comprehensive", "yes_comprehensive"),
                    Synonym::contains("some", "some_metrics"),
                    Synonym::contains("metrics", "some_metrics"),
                    Synonym::contains("starting", "starting"),
                    Synonym::contains("just", "starting"),
                    Synonym::contains("yes", "yes_comprehensive"),
                    Synonym::contains("no", "not_yet"),
                ],
                "Please pick one of the options.",
            ),
        )
        .with_explanation(
            "B Corp requires impact measurement across five areas: Governance, Workers, \
             Community, Environment, Customers.",
        )
        .with_options(vec![
            ChoiceOption::new("Yes - Comprehensive tracking", "yes_comprehensive").with_icon("✅"),
            ChoiceOption::new("Some metrics tracked", "some_metrics").with_icon("📊"),
            ChoiceOption::new("Just starting", "starting").with_icon("🌱"),
            ChoiceOption::new("Not yet", "not_yet").with_icon("❌"),
        ])
        .with_success("Great context! 📈"),
        QuestionStep::new(
            "team_size_implementation",
            "How many people can you dedicate to the certification process?",
            AnswerRule::choice(
                vec![
                    Synonym::contains("dedicated", "dedicated_team"),
                    Synonym::contains("team", "dedicated_team"),
                    Synonym::contains("cross-functional", "cross_functional"),
                    Synonym::contains("cross", "cross_functional"),
                    Synonym::contains("figure", "need_plan"),
                    Synonym::contains("need", "need_plan"),
                    Synonym::contains("part-time", "one_parttime"),
                    Synonym::contains("one", "one_parttime"),
                    Synonym::contains("1", "one_parttime"),
                ],
                "Please pick one of the options.",
            ),
        )
        .with_explanation(
            "B Corp typically requires 0.5-2 FTE, while EcoVadis needs 0.25-1 FTE. Both need \
             cross-functional input (HR, operations, finance, etc.).",
        )
        .with_options(vec![
            ChoiceOption::new("Dedicated team (2+ people)", "dedicated_team").with_icon("👥"),
            ChoiceOption::new("1 person part-time", "one_parttime").with_icon("👤"),
            ChoiceOption::new("Cross-functional input only", "cross_functional").with_icon("🤝"),
            ChoiceOption::new("Need to figure this out", "need_plan").with_icon("🤔"),
        ])
        .with_success("Perfect! Resource planning is key. 👍"),
        QuestionStep::new(
            "long_term_sustainability_goals",
            "What are your long-term sustainability and ESG goals?",
            AnswerRule::text(
                10,
                "Please share your long-term ESG vision - this helps us provide the best \
                 recommendations.",
            ),
        )
        .with_explanation(
            "E.g., Net zero by 2030, becoming a B Corp, industry leadership in sustainability, \
             meeting regulatory requirements, attracting impact investors.",
        )
        .with_success("Thank you for sharing your vision! That's inspiring. 🌟"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::answers::{AnswerValue, CollectedAnswers};
    use crate::flow::engine::AnswerCheck;

    fn accepted_value(check: AnswerCheck) -> String {
        match check {
            AnswerCheck::Accepted { value, .. } => value.to_string(),
            other => panic!("expected Accepted, got {other:?}"),
        }
    }

    #[test]
    fn builtin_flows_pass_authoring_checks() {
        let catalog = FlowCatalog::builtin().unwrap();
        assert_eq!(catalog.get(FlowKind::Readiness).len(), 9);
        assert_eq!(catalog.get(FlowKind::Ecovadis).len(), 12);
        assert_eq!(catalog.get(FlowKind::Bcorp).len(), 10);
        assert_eq!(catalog.iter().count(), 3);
    }

    #[test]
    fn kind_round_trips_through_str_and_serde() {
        for kind in FlowKind::ALL {
            assert_eq!(kind.to_string().parse::<FlowKind>().unwrap(), kind);
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{kind}\"")
            );
        }
        assert!("basic".parse::<FlowKind>().is_err());
    }

    #[test]
    fn readiness_scoring_fields_are_collected() {
        let catalog = FlowCatalog::builtin().unwrap();
        let fields: Vec<&str> = catalog.get(FlowKind::Readiness).fields().collect();
        for required in crate::scoring::REQUIRED_FIELDS {
            assert!(fields.contains(required), "{required} not asked");
        }
    }

    #[test]
    fn only_readiness_is_scored() {
        assert!(FlowKind::Readiness.is_scored());
        assert!(!FlowKind::Ecovadis.is_scored());
        assert!(!FlowKind::Bcorp.is_scored());
    }

    #[test]
    fn company_prompt_greets_by_name() {
        let catalog = FlowCatalog::builtin().unwrap();
        let answers = CollectedAnswers::new().with("contact_name", "Jo");
        let q = catalog.get(FlowKind::Readiness).question(1, &answers);
        assert_eq!(q.prompt, "Great to meet you, Jo! What's your company name?");
    }

    #[test]
    fn certification_interest_normalises_free_text() {
        let catalog = FlowCatalog::builtin().unwrap();
        let flow = catalog.get(FlowKind::Readiness);
        let answers = CollectedAnswers::new();
        assert_eq!(accepted_value(flow.validate_answer(6, "b corp please", &answers)), "bcorp");
        assert_eq!(accepted_value(flow.validate_answer(6, "ECOVADIS", &answers)), "ecovadis");
        assert_eq!(accepted_value(flow.validate_answer(6, "both of them", &answers)), "both");
        assert!(matches!(
            flow.validate_answer(6, "what is the difference?", &answers),
            AnswerCheck::Detour { .. }
        ));
        assert!(matches!(
            flow.validate_answer(6, "ISO 14001", &answers),
            AnswerCheck::Rejected { .. }
        ));
    }

    #[test]
    fn ecovadis_unmatched_choice_is_rejected() {
        let catalog = FlowCatalog::builtin().unwrap();
        let flow = catalog.get(FlowKind::Ecovadis);
        let answers = CollectedAnswers::new();
        assert_eq!(accepted_value(flow.validate_answer(0, "Yes", &answers)), "yes");
        assert_eq!(accepted_value(flow.validate_answer(0, "n", &answers)), "no");
        match flow.validate_answer(0, "platinum", &answers) {
            AnswerCheck::Rejected { message } => assert!(message.starts_with(YES_NO)),
            other => panic!("expected Rejected, got {other:?}"),
        }
        assert!(matches!(
            flow.validate_answer(9, "platinum", &answers),
            AnswerCheck::Rejected { .. }
        ));
    }

    #[test]
    fn ecovadis_timeline_and_scorecard_synonyms() {
        let catalog = FlowCatalog::builtin().unwrap();
        let flow = catalog.get(FlowKind::Ecovadis);
        let answers = CollectedAnswers::new();
        assert_eq!(accepted_value(flow.validate_answer(7, "less than 6 months", &answers)), "under_6");
        assert_eq!(accepted_value(flow.validate_answer(7, "no tender yet", &answers)), "no_tender");
        assert_eq!(accepted_value(flow.validate_answer(5, "not sure", &answers)), "unsure");
        assert_eq!(accepted_value(flow.validate_answer(5, "No mention", &answers)), "no");
    }

    #[test]
    fn bcorp_flow_completes_with_option_values() {
        let catalog = FlowCatalog::builtin().unwrap();
        let flow = catalog.get(FlowKind::Bcorp);
        let mut answers = CollectedAnswers::new();
        for (index, step) in flow.steps().iter().enumerate() {
            let input = step
                .options
                .first()
                .map(|o| o.value.clone())
                .unwrap_or_else(|| "Net zero by 2030 and B Corp status".to_string());
            match flow.validate_answer(index, &input, &answers) {
                AnswerCheck::Accepted { field, value, .. } => answers.record(field, value),
                other => panic!("step {index} rejected {input:?}: {other:?}"),
            }
        }
        assert!(flow.missing_fields(&answers).is_empty());
        assert_eq!(
            answers.get("esg_audience"),
            Some(&AnswerValue::Text("consumers_employees_investors".into()))
        );
    }
}
