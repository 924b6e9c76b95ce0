//! Lead notifications: fire-and-forget hand-off from request handlers to a
//! background worker that tells the sales team.
//!
//! Handlers call [`NotificationDispatcher::dispatch`], which never blocks
//! and never fails. A single worker task drains the queue into a
//! [`LeadNotifier`]; delivery failures are logged and dropped.

pub mod email;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::NotifyError;
use crate::flow::answers::CollectedAnswers;
use crate::flow::catalog::FlowKind;
use crate::scoring::ScoreResult;

pub use email::EmailNotifier;

/// A scored lead ready to send to the sales team.
#[derive(Debug, Clone, Serialize)]
pub struct LeadNotification {
    pub id: Uuid,
    pub flow: FlowKind,
    pub answers: CollectedAnswers,
    pub result: ScoreResult,
    pub submitted_at: DateTime<Utc>,
}

impl LeadNotification {
    pub fn new(flow: FlowKind, answers: CollectedAnswers, result: ScoreResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            flow,
            answers,
            result,
            submitted_at: Utc::now(),
        }
    }

    /// Text answer for `field`, or `"N/A"`.
    pub fn answer(&self, field: &str) -> String {
        self.answers
            .get(field)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// A sink for scored leads.
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    async fn notify(&self, lead: &LeadNotification) -> Result<(), NotifyError>;
}

/// Writes leads to the log. Used when SMTP is not configured.
pub struct LogNotifier;

#[async_trait]
impl LeadNotifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(&self, lead: &LeadNotification) -> Result<(), NotifyError> {
        info!(
            lead_id = %lead.id,
            company = %lead.answer("company_name"),
            email = %lead.answer("email"),
            score = lead.result.score,
            urgency = %lead.result.urgency,
            action = %lead.result.action,
            "New lead"
        );
        Ok(())
    }
}

/// Sending half of the notification queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    tx: mpsc::Sender<LeadNotification>,
}

impl NotificationDispatcher {
    /// Queue a lead without waiting. Returns whether it was queued; a full
    /// or closed queue drops the lead with a warning.
    pub fn dispatch(&self, lead: LeadNotification) -> bool {
        match self.tx.try_send(lead) {
            Ok(()) => true,
            Err(TrySendError::Full(lead)) => {
                warn!(lead_id = %lead.id, "Notification queue full, dropping lead notification");
                false
            }
            Err(TrySendError::Closed(lead)) => {
                warn!(lead_id = %lead.id, "Notification worker gone, dropping lead notification");
                false
            }
        }
    }
}

/// Create a bounded notification queue.
pub fn notification_channel(
    capacity: usize,
) -> (NotificationDispatcher, mpsc::Receiver<LeadNotification>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (NotificationDispatcher { tx }, rx)
}

/// Drain the queue into `notifier` until every dispatcher is dropped.
pub fn spawn_notification_worker(
    mut rx: mpsc::Receiver<LeadNotification>,
    notifier: Arc<dyn LeadNotifier>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(notifier = notifier.name(), "Notification worker started");
        while let Some(lead) = rx.recv().await {
            match notifier.notify(&lead).await {
                Ok(()) => info!(
                    lead_id = %lead.id,
                    notifier = notifier.name(),
                    "Lead notification delivered"
                ),
                Err(e) => warn!(
                    lead_id = %lead.id,
                    notifier = notifier.name(),
                    error = %e,
                    "Lead notification failed"
                ),
            }
        }
        info!(notifier = notifier.name(), "Notification worker stopped");
    })
}
