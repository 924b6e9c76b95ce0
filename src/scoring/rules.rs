//! Keyword rules for the free-text scoring inputs.
//!
//! Runs over the ESG status, industry and pain-point answers:
//! - ESG status → maturity bucket (first matching rule wins)
//! - Industry → high environmental exposure bonus
//! - Pain points → focus points, every matching rule contributes
//!
//! Rules are data; the scorer only asks which ones match.

use regex::Regex;
use tracing::debug;

/// How far along the lead's ESG programme is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaturityBucket {
    Starting,
    Partial,
    Established,
    Unclassified,
}

impl MaturityBucket {
    /// Less mature leads need more help and score higher.
    pub fn points(&self) -> u8 {
        match self {
            Self::Starting => 25,
            Self::Partial => 15,
            Self::Unclassified => 10,
            Self::Established => 5,
        }
    }

    pub fn focus_point(&self) -> &'static str {
        match self {
            Self::Starting => "Foundational ESG policies and baseline measurement",
            Self::Partial => "Building on existing ESG measures to close gaps",
            Self::Established => "Optimising an established ESG programme for certification",
            Self::Unclassified => "Gap analysis to clarify current ESG position",
        }
    }
}

/// Maps ESG status text onto a maturity bucket.
#[derive(Debug, Clone)]
pub struct MaturityRule {
    /// Human-readable pattern description.
    pub pattern: String,
    pub regex: Regex,
    pub bucket: MaturityBucket,
}

/// A keyword group that, when present, contributes a focus point.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub pattern: String,
    pub regex: Regex,
    pub focus_point: String,
}

/// Compiled keyword rules used by the lead scorer.
#[derive(Debug, Clone)]
pub struct ScoringRules {
    maturity_rules: Vec<MaturityRule>,
    high_exposure_industry: Regex,
    pain_point_rules: Vec<KeywordRule>,
}

impl ScoringRules {
    /// The standard rule set.
    pub fn default_rules() -> Self {
        let maturity_rules = vec![
            // Order matters: first match wins
            MaturityRule {
                pattern: "starting/none/not sure".into(),
                regex: Regex::new(
                    r"(?i)\b(start(ing)?|beginning|none|nothing|not sure|unsure|no idea)\b",
                )
                .unwrap(),
                bucket: MaturityBucket::Starting,
            },
            MaturityRule {
                pattern: "some/partial/basic".into(),
                regex: Regex::new(r"(?i)\b(some|partial(ly)?|basic|early)\b").unwrap(),
                bucket: MaturityBucket::Partial,
            },
            MaturityRule {
                pattern: "established/mature/comprehensive".into(),
                regex: Regex::new(
                    r"(?i)\b(established|mature|comprehensive|fully|compliant|certified|advanced)\b",
                )
                .unwrap(),
                bucket: MaturityBucket::Established,
            },
        ];

        // Substring match: "petrochemicals" and "bioenergy" count too.
        let high_exposure_industry = Regex::new(
            r"(?i)(manufactur|construction|energy|logistic|chemical|mining|transport|agricultur)",
        )
        .unwrap();

        let pain_point_rules = vec![
            KeywordRule {
                pattern: "reporting/documentation".into(),
                regex: Regex::new(r"(?i)(report|document)").unwrap(),
                focus_point: "ESG reporting and documentation support".into(),
            },
            KeywordRule {
                pattern: "data/measurement".into(),
                regex: Regex::new(r"(?i)(data|measur|metric)").unwrap(),
                focus_point: "Data collection and measurement systems".into(),
            },
            KeywordRule {
                pattern: "cost/budget".into(),
                regex: Regex::new(r"(?i)(cost|budget|afford)").unwrap(),
                focus_point: "Cost-effective ESG implementation solutions".into(),
            },
            KeywordRule {
                pattern: "compliance/regulation".into(),
                regex: Regex::new(r"(?i)(complian|regulat|legislat)").unwrap(),
                focus_point: "Regulatory compliance roadmap".into(),
            },
        ];

        Self {
            maturity_rules,
            high_exposure_industry,
            pain_point_rules,
        }
    }

    /// Classify an ESG status answer.
    pub fn maturity(&self, status: &str) -> MaturityBucket {
        for rule in &self.maturity_rules {
            if rule.regex.is_match(status) {
                debug!(rule = %rule.pattern, "ESG status matched maturity rule");
                return rule.bucket;
            }
        }
        MaturityBucket::Unclassified
    }

    pub fn is_high_exposure(&self, industry: &str) -> bool {
        self.high_exposure_industry.is_match(industry)
    }

    /// Pain-point rules that match, in table order.
    pub fn pain_point_hits<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a KeywordRule> {
        self.pain_point_rules
            .iter()
            .filter(move |rule| rule.regex.is_match(text))
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maturity_first_match_wins() {
        let rules = ScoringRules::default_rules();
        assert_eq!(rules.maturity("just starting"), MaturityBucket::Starting);
        assert_eq!(rules.maturity("None"), MaturityBucket::Starting);
        assert_eq!(rules.maturity("not sure, some policies maybe"), MaturityBucket::Starting);
        assert_eq!(rules.maturity("have some measures"), MaturityBucket::Partial);
        assert_eq!(rules.maturity("basic policies"), MaturityBucket::Partial);
        assert_eq!(rules.maturity("well established"), MaturityBucket::Established);
        assert_eq!(rules.maturity("fully compliant"), MaturityBucket::Established);
        assert_eq!(rules.maturity("we recycle"), MaturityBucket::Unclassified);
    }

    #[test]
    fn maturity_matches_whole_words() {
        let rules = ScoringRules::default_rules();
        // "handsome" contains "some"
        assert_eq!(rules.maturity("handsome efforts"), MaturityBucket::Unclassified);
    }

    #[test]
    fn maturity_points_are_inverse() {
        assert!(MaturityBucket::Starting.points() > MaturityBucket::Partial.points());
        assert!(MaturityBucket::Partial.points() > MaturityBucket::Unclassified.points());
        assert!(MaturityBucket::Unclassified.points() > MaturityBucket::Established.points());
    }

    #[test]
    fn industry_exposure() {
        let rules = ScoringRules::default_rules();
        for industry in ["Manufacturing", "road transport", "Chemicals", "agriculture & food"] {
            assert!(rules.is_high_exposure(industry), "{industry}");
        }
        for industry in ["software", "legal services", "retail"] {
            assert!(!rules.is_high_exposure(industry), "{industry}");
        }
    }

    #[test]
    fn industry_keywords_match_inside_compound_words() {
        let rules = ScoringRules::default_rules();
        for industry in ["petrochemicals", "bioenergy", "remanufacturing", "Agritech / agricultural"] {
            assert!(rules.is_high_exposure(industry), "{industry}");
        }
    }

    #[test]
    fn pain_point_keywords_match_inside_words() {
        let rules = ScoringRules::default_rules();
        let hits: Vec<&str> = rules
            .pain_point_hits("Underreported metadata, non-compliance")
            .map(|r| r.pattern.as_str())
            .collect();
        assert_eq!(
            hits,
            vec!["reporting/documentation", "data/measurement", "compliance/regulation"]
        );
    }

    #[test]
    fn started_long_ago_is_not_starting() {
        let rules = ScoringRules::default_rules();
        assert_eq!(
            rules.maturity("started years ago, now fully compliant"),
            MaturityBucket::Established
        );
        assert_eq!(rules.maturity("we are just starting"), MaturityBucket::Starting);
        assert_eq!(rules.maturity("about to start"), MaturityBucket::Starting);
    }

    #[test]
    fn pain_points_match_independently() {
        let rules = ScoringRules::default_rules();
        let hits: Vec<&str> = rules
            .pain_point_hits("Reporting is slow and the budget is tight")
            .map(|r| r.pattern.as_str())
            .collect();
        assert_eq!(hits, vec!["reporting/documentation", "cost/budget"]);

        assert_eq!(rules.pain_point_hits("nothing in particular").count(), 0);
        assert_eq!(
            rules
                .pain_point_hits("documentation, data, costs and new regulations")
                .count(),
            4
        );
    }
}
