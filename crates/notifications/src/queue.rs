//! Durable job queue port.

use std::sync::Arc;

use stockwatch_core::JobId;

use crate::JobSubmission;

/// Why a job could not be handed to the queue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("queue unavailable: {0}")]
    Unavailable(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Somewhere jobs are persisted for later, at-least-once execution.
///
/// `submit` must return as soon as the job is durably accepted; it never waits
/// for the job to run. Retry, backoff and worker scheduling belong to the
/// queue implementation behind this trait.
pub trait JobQueue: Send + Sync {
    fn submit(&self, submission: JobSubmission) -> Result<JobId, QueueError>;
}

impl<Q> JobQueue for Arc<Q>
where
    Q: JobQueue + ?Sized,
{
    fn submit(&self, submission: JobSubmission) -> Result<JobId, QueueError> {
        (**self).submit(submission)
    }
}

impl<Q> JobQueue for Box<Q>
where
    Q: JobQueue + ?Sized,
{
    fn submit(&self, submission: JobSubmission) -> Result<JobId, QueueError> {
        (**self).submit(submission)
    }
}
