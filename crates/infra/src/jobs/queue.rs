//! `JobQueue` on top of a `JobStore`.

use tracing::debug;

use stockwatch_core::JobId;
use stockwatch_notifications::{JobQueue, JobSubmission, QueueError};

use super::store::{JobStore, JobStoreError};
use super::types::Job;

/// Submits jobs by persisting them as `Pending` records in a store.
#[derive(Debug, Clone)]
pub struct JobStoreQueue<S> {
    store: S,
}

impl<S: JobStore> JobStoreQueue<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl From<JobStoreError> for QueueError {
    fn from(value: JobStoreError) -> Self {
        match value {
            JobStoreError::AlreadyExists(id) => {
                QueueError::Rejected(format!("job already exists: {id}"))
            }
            JobStoreError::Storage(msg) => QueueError::Unavailable(msg),
        }
    }
}

impl<S: JobStore> JobQueue for JobStoreQueue<S> {
    fn submit(&self, submission: JobSubmission) -> Result<JobId, QueueError> {
        let job = Job::from_submission(submission);
        let job_type = job.job_type.clone();
        let job_id = self.store.enqueue(job)?;
        debug!(job_id = %job_id, job_type = %job_type, "job stored");
        Ok(job_id)
    }
}
