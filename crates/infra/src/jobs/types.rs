//! Persisted job record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockwatch_core::JobId;
use stockwatch_notifications::JobSubmission;

/// Job execution status.
///
/// This crate only ever writes `Pending`. The remaining states are driven by
/// the queue's worker processes and are kept so stored records round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Queued, waiting to be picked up
    Pending,
    /// Currently being executed
    Running,
    /// Completed successfully
    Succeeded,
    /// Failed; the worker decides whether to retry
    Failed { error: String, attempt: u32 },
}

/// A queued background job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job ID
    pub id: JobId,
    /// Job type for routing to a worker
    pub job_type: String,
    /// JSON payload
    pub payload: JsonValue,
    /// Current status
    pub status: JobStatus,
    /// When the job was submitted
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Create a new pending job.
    pub fn new(job_type: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            id: JobId::new(),
            job_type: job_type.into(),
            payload,
            status: JobStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn from_submission(submission: JobSubmission) -> Self {
        Self::new(submission.job_type, submission.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submissions_become_pending_jobs() {
        let job = Job::from_submission(JobSubmission::new(
            "variant-low-stock",
            serde_json::json!({"variant_id": "x", "recipients": []}),
        ));

        assert_eq!(job.job_type, "variant-low-stock");
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.payload["variant_id"], "x");
    }

    #[test]
    fn status_serializes_snake_case() {
        let failed = JobStatus::Failed {
            error: "smtp timeout".into(),
            attempt: 2,
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({"failed": {"error": "smtp timeout", "attempt": 2}})
        );
        assert_eq!(
            serde_json::to_value(JobStatus::Pending).unwrap(),
            serde_json::json!("pending")
        );
    }
}
