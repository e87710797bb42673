//! Crossing event → queued notification job.
//!
//! The dispatcher is the boundary where notification failures stop. Whatever
//! happens while submitting, `dispatch` returns a [`DispatchOutcome`] and the
//! stock edit or order payment that raised the event carries on.

use tracing::{debug, error, info};

use stockwatch_core::JobId;
use stockwatch_events::EventHandler;
use stockwatch_inventory::CrossingEvent;

use crate::{JobQueue, NotificationJob, NotificationSettings, QueueError};

/// Why a crossing did not lead to a submission. Deliberate, not an error.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Email sending is switched off in the settings.
    EmailDisabled,
    /// Nobody is configured to receive the notification.
    NoRecipients,
}

/// Result of one dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Submitted(JobId),
    Skipped(SkipReason),
    /// Submission failed. Already logged; never propagated to the trigger.
    Failed(QueueError),
}

impl DispatchOutcome {
    pub fn job_id(&self) -> Option<JobId> {
        match self {
            DispatchOutcome::Submitted(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, DispatchOutcome::Submitted(_))
    }
}

/// Submits one `variant-low-stock` job per crossing event.
///
/// Stateless apart from the injected queue handle and settings; safe to share
/// across request handlers.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher<Q> {
    queue: Q,
    settings: NotificationSettings,
}

impl<Q: JobQueue> NotificationDispatcher<Q> {
    pub fn new(queue: Q, settings: NotificationSettings) -> Self {
        Self { queue, settings }
    }

    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub fn dispatch(&self, event: &CrossingEvent) -> DispatchOutcome {
        if !self.settings.send_email {
            debug!(
                variant_id = %event.variant_id,
                kind = ?event.kind(),
                "stock crossing detected; email notifications disabled"
            );
            return DispatchOutcome::Skipped(SkipReason::EmailDisabled);
        }

        if self.settings.recipients.is_empty() {
            debug!(
                variant_id = %event.variant_id,
                kind = ?event.kind(),
                "stock crossing detected; no recipients configured"
            );
            return DispatchOutcome::Skipped(SkipReason::NoRecipients);
        }

        let job = NotificationJob::for_crossing(event, &self.settings.recipients);
        match job.to_submission().and_then(|s| self.queue.submit(s)) {
            Ok(job_id) => {
                info!(
                    variant_id = %event.variant_id,
                    job_id = %job_id,
                    kind = ?event.kind(),
                    previous_stock = event.previous_stock,
                    new_stock = event.new_stock,
                    recipients = job.recipients.len(),
                    "low-stock notification queued"
                );
                DispatchOutcome::Submitted(job_id)
            }
            Err(e) => {
                error!(
                    variant_id = %event.variant_id,
                    kind = ?event.kind(),
                    error = %e,
                    "failed to queue low-stock notification"
                );
                DispatchOutcome::Failed(e)
            }
        }
    }
}

impl<Q: JobQueue> EventHandler<CrossingEvent> for NotificationDispatcher<Q> {
    type Output = DispatchOutcome;

    fn handle(&self, event: &CrossingEvent) -> DispatchOutcome {
        self.dispatch(event)
    }
}
