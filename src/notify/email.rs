//! Lead notification over SMTP via lettre.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;

use super::{LeadNotification, LeadNotifier};
use crate::config::SmtpConfig;
use crate::error::NotifyError;
use crate::flow::validate::parse_day_count;
use crate::scoring::{RecommendedAction, ScoreResult, Urgency};

const NAME: &str = "email";

/// Sends each lead as a plain-text email to the sales team.
pub struct EmailNotifier {
    from: Mailbox,
    recipients: Vec<Mailbox>,
    transport: SmtpTransport,
}

impl EmailNotifier {
    /// Validate addresses and set up the SMTP relay. Nothing is sent yet.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let from = parse_mailbox(&config.from_address, "from")?;
        let recipients = config
            .recipients
            .iter()
            .map(|r| parse_mailbox(r, "recipient"))
            .collect::<Result<Vec<_>, _>>()?;

        let creds = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );
        let transport = SmtpTransport::relay(&config.host)
            .map_err(|e| NotifyError::BuildFailed {
                name: NAME.into(),
                reason: format!("SMTP relay error: {e}"),
            })?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            from,
            recipients,
            transport,
        })
    }

    fn build_message(&self, lead: &LeadNotification) -> Result<Message, NotifyError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(subject_line(&lead.answer("company_name"), &lead.result));
        for to in &self.recipients {
            builder = builder.to(to.clone());
        }
        // Let the sales team reply straight to the lead.
        if let Some(Ok(reply_to)) = lead
            .answers
            .get("email")
            .and_then(|v| v.as_text())
            .map(|e| e.parse::<Mailbox>())
        {
            builder = builder.reply_to(reply_to);
        }

        builder
            .body(plain_text_body(lead))
            .map_err(|e| NotifyError::BuildFailed {
                name: NAME.into(),
                reason: format!("Failed to build email: {e}"),
            })
    }
}

#[async_trait]
impl LeadNotifier for EmailNotifier {
    fn name(&self) -> &str {
        NAME
    }

    async fn notify(&self, lead: &LeadNotification) -> Result<(), NotifyError> {
        let message = self.build_message(lead)?;
        let transport = self.transport.clone();

        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| NotifyError::SendFailed {
                name: NAME.into(),
                reason: format!("send task failed: {e}"),
            })?
            .map_err(|e| NotifyError::SendFailed {
                name: NAME.into(),
                reason: format!("SMTP send failed: {e}"),
            })?;

        tracing::info!(lead_id = %lead.id, recipients = self.recipients.len(), "Lead email sent");
        Ok(())
    }
}

fn parse_mailbox(address: &str, role: &str) -> Result<Mailbox, NotifyError> {
    address.parse().map_err(|e| NotifyError::BuildFailed {
        name: NAME.into(),
        reason: format!("Invalid {role} address {address:?}: {e}"),
    })
}

/// `🎯 New ESG Lead [HIGH]: Acme (Score: 100)`
pub fn subject_line(company: &str, result: &ScoreResult) -> String {
    format!(
        "🎯 New ESG Lead [{}]: {} (Score: {})",
        result.urgency.as_str().to_uppercase(),
        company,
        result.score
    )
}

/// What the sales team should do, tuned to how urgent the lead is.
pub fn action_text(action: RecommendedAction, urgency: Urgency) -> &'static str {
    use RecommendedAction::*;
    use Urgency::*;
    match (action, urgency) {
        (BookFreeConsult, High) => "BOOK FREE CONSULTATION - Contact within 24 hours (URGENT)",
        (BookFreeConsult, Medium) => "BOOK FREE CONSULTATION - Priority follow-up within 48 hours",
        (BookFreeConsult, Low) => "BOOK FREE CONSULTATION - Contact within 1 week",
        (Buy50Assessment, High) => "BUY £50 ASSESSMENT - Quick win opportunity, act fast",
        (Buy50Assessment, Medium) => "BUY £50 ASSESSMENT - Offer low-commitment entry point",
        (Buy50Assessment, Low) => "BUY £50 ASSESSMENT - Start with assessment, build relationship",
        (Nurture, High) => "NURTURE - Add to hot pipeline, monthly check-ins",
        (Nurture, Medium) => "NURTURE - Add to pipeline, quarterly touch points",
        (Nurture, Low) => "NURTURE - Add to long-term pipeline",
    }
}

pub fn timeline_text(days: u32, urgency: Urgency) -> String {
    if days == 0 {
        return "Timeline not specified".to_string();
    }
    match urgency {
        Urgency::High => format!("Tender in {days} days - URGENT ACTION REQUIRED"),
        Urgency::Medium => format!("{days} days until tender - Priority follow-up"),
        Urgency::Low => format!("{days} days timeline - Standard pipeline"),
    }
}

fn pounds(amount: Decimal) -> String {
    format!("£{}", amount.round_dp(0))
}

fn numbered(items: &[String]) -> String {
    if items.is_empty() {
        return "None specified".to_string();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {item}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain-text email body for one lead.
pub fn plain_text_body(lead: &LeadNotification) -> String {
    let result = &lead.result;
    let tender_days = lead
        .answers
        .get("tender_days")
        .and_then(|v| v.as_number().or_else(|| v.as_text().and_then(parse_day_count)))
        .unwrap_or(0);

    let skus = if result.pricing_recommendation.sku_recommendations.is_empty() {
        "No specific pricing recommendations".to_string()
    } else {
        result
            .pricing_recommendation
            .sku_recommendations
            .iter()
            .map(|rec| {
                let c = &rec.commission;
                format!(
                    "{}: {} - {} (Commission: {}, shares {} / {})",
                    rec.sku.code,
                    rec.sku.description,
                    pounds(rec.sku.rrp),
                    pounds(c.total),
                    pounds(c.first_share),
                    pounds(c.second_share),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "NEW ESG LEAD NOTIFICATION
========================

URGENCY: {urgency}
SCORE: {score}/100
ACTION: {action}

LEAD INFORMATION
----------------
Name: {name}
Company: {company}
Email: {email}
Size: {size}
Industry: {industry}
Tender Timeline: {timeline}
Current ESG Status: {status}

PAIN POINTS
-----------
{pain_points}

LEAD BRIEF
----------
{brief}

FOCUS POINTS
------------
{focus}

OPENING QUESTIONS
-----------------
{questions}

PRICING RECOMMENDATIONS
-----------------------
Tier: {tier}
{skus}

Lead ID: {id}
Submitted: {submitted}
",
        urgency = result.urgency.as_str().to_uppercase(),
        score = result.score,
        action = action_text(result.action, result.urgency),
        name = lead.answer("contact_name"),
        company = lead.answer("company_name"),
        email = lead.answer("email"),
        size = lead.answer("size"),
        industry = lead.answer("industry"),
        timeline = timeline_text(tender_days, result.urgency),
        status = lead.answer("current_esg_status"),
        pain_points = lead.answer("pain_points"),
        brief = result.lead_brief,
        focus = numbered(&result.focus_points),
        questions = numbered(&result.opening_questions),
        tier = result.pricing_recommendation.tier,
        id = lead.id,
        submitted = lead.submitted_at.to_rfc3339(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::answers::CollectedAnswers;
    use crate::flow::catalog::FlowKind;
    use crate::scoring::LeadScorer;
    use secrecy::SecretString;

    fn lead() -> LeadNotification {
        let answers = CollectedAnswers::new()
            .with("contact_name", "Jo")
            .with("company_name", "Acme")
            .with("size", "large")
            .with("tender_days", 10u32)
            .with("industry", "manufacturing")
            .with("current_esg_status", "just starting")
            .with("pain_points", "need reporting help")
            .with("email", "jo@acme.com");
        let result = LeadScorer::default().score(&answers).unwrap();
        LeadNotification::new(FlowKind::Readiness, answers, result)
    }

    fn config() -> SmtpConfig {
        let _ = rustls::crypto::ring::default_provider().install_default();
        SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            username: "leads@example.com".into(),
            password: SecretString::from("secret"),
            from_address: "leads@example.com".into(),
            recipients: vec!["sales@example.com".into(), "ops@example.com".into()],
        }
    }

    #[test]
    fn subject_carries_urgency_company_and_score() {
        let lead = lead();
        assert_eq!(
            subject_line("Acme", &lead.result),
            "🎯 New ESG Lead [HIGH]: Acme (Score: 100)"
        );
    }

    #[test]
    fn action_text_depends_on_urgency() {
        assert_eq!(
            action_text(RecommendedAction::Nurture, Urgency::Low),
            "NURTURE - Add to long-term pipeline"
        );
        assert_ne!(
            action_text(RecommendedAction::BookFreeConsult, Urgency::High),
            action_text(RecommendedAction::BookFreeConsult, Urgency::Low)
        );
    }

    #[test]
    fn timeline_without_tender() {
        assert_eq!(timeline_text(0, Urgency::Low), "Timeline not specified");
        assert_eq!(timeline_text(45, Urgency::Medium), "45 days until tender - Priority follow-up");
    }

    #[test]
    fn body_lists_lead_details_and_pricing() {
        let body = plain_text_body(&lead());
        assert!(body.contains("URGENCY: HIGH"));
        assert!(body.contains("SCORE: 100/100"));
        assert!(body.contains("ACTION: BOOK FREE CONSULTATION - Contact within 24 hours (URGENT)"));
        assert!(body.contains("Company: Acme"));
        assert!(body.contains("Tender Timeline: Tender in 10 days - URGENT ACTION REQUIRED"));
        assert!(body.contains("1. Urgent tender deadline in 10 days"));
        assert!(body.contains("Tier: Large (101+)"));
        assert!(body.contains("CFR-4: Carbon Footprint Report (101-250 employees) - £2760"));
        assert!(body.contains("Commission: £966, shares £483 / £483"));
    }

    #[test]
    fn body_reads_day_count_given_as_text() {
        let answers = lead().answers.with("tender_days", "45 days");
        let result = LeadScorer::default().score(&answers).unwrap();
        let body = plain_text_body(&LeadNotification::new(FlowKind::Readiness, answers, result));
        assert!(
            body.contains("Tender Timeline: 45 days until tender - Priority follow-up"),
            "{body}"
        );
        assert!(!body.contains("Timeline not specified"));
    }

    #[test]
    fn message_builds_with_all_recipients() {
        let notifier = EmailNotifier::new(&config()).unwrap();
        let message = notifier.build_message(&lead()).unwrap();
        assert_eq!(message.envelope().to().len(), 2);
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Reply-To: jo@acme.com"));
    }

    #[test]
    fn bad_recipient_is_rejected_up_front() {
        let mut config = config();
        config.recipients.push("not an address".into());
        assert!(matches!(
            EmailNotifier::new(&config),
            Err(NotifyError::BuildFailed { .. })
        ));
    }
}
