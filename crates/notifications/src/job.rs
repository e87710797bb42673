use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockwatch_core::VariantId;
use stockwatch_inventory::CrossingEvent;

use crate::QueueError;

/// Job type the email worker subscribes to.
pub const VARIANT_LOW_STOCK_JOB: &str = "variant-low-stock";

/// Payload of a low-stock notification job.
///
/// Only the variant's id travels: the worker may run after the variant changed
/// again and must load its current state. Recipients are captured at dispatch
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationJob {
    pub variant_id: VariantId,
    pub recipients: Vec<String>,
}

impl NotificationJob {
    pub fn for_crossing(event: &CrossingEvent, recipients: &[String]) -> Self {
        Self {
            variant_id: event.variant_id,
            recipients: recipients.to_vec(),
        }
    }

    pub fn to_submission(&self) -> Result<JobSubmission, QueueError> {
        let payload =
            serde_json::to_value(self).map_err(|e| QueueError::Serialization(e.to_string()))?;
        Ok(JobSubmission::new(VARIANT_LOW_STOCK_JOB, payload))
    }
}

/// Queue-agnostic job envelope: a type name plus a JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSubmission {
    pub job_type: String,
    pub payload: JsonValue,
}

impl JobSubmission {
    pub fn new(job_type: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            job_type: job_type.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_payload_has_stable_schema() {
        let variant_id = VariantId::new();
        let event = CrossingEvent {
            variant_id,
            previous_stock: 7,
            new_stock: 4,
        };
        let recipients = vec!["a@x.com".to_string(), "b@x.com".to_string()];

        let submission = NotificationJob::for_crossing(&event, &recipients)
            .to_submission()
            .unwrap();

        assert_eq!(submission.job_type, "variant-low-stock");
        assert_eq!(
            submission.payload,
            serde_json::json!({
                "variant_id": variant_id.to_string(),
                "recipients": ["a@x.com", "b@x.com"],
            })
        );
    }

    #[test]
    fn workers_can_read_the_payload_back() {
        let job = NotificationJob {
            variant_id: VariantId::new(),
            recipients: vec!["ops@shop.test".to_string()],
        };
        let submission = job.to_submission().unwrap();
        let decoded: NotificationJob = serde_json::from_value(submission.payload).unwrap();
        assert_eq!(decoded, job);
    }
}
