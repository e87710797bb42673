//! Job storage implementations.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use stockwatch_core::JobId;

use super::types::{Job, JobStatus};

/// Job store abstraction.
pub trait JobStore: Send + Sync {
    /// Enqueue a new job.
    fn enqueue(&self, job: Job) -> Result<JobId, JobStoreError>;

    /// Get a job by ID.
    fn get(&self, job_id: JobId) -> Result<Option<Job>, JobStoreError>;

    /// List jobs of one type, oldest first.
    fn list_by_type(&self, job_type: &str, limit: usize) -> Result<Vec<Job>, JobStoreError>;

    /// Number of jobs still waiting for a worker.
    fn pending_count(&self) -> Result<usize, JobStoreError>;
}

/// Job store error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobStoreError {
    #[error("job already exists: {0}")]
    AlreadyExists(JobId),
    #[error("storage error: {0}")]
    Storage(String),
}

/// In-memory job store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

fn poisoned() -> JobStoreError {
    JobStoreError::Storage("job store lock poisoned".to_string())
}

impl JobStore for InMemoryJobStore {
    fn enqueue(&self, job: Job) -> Result<JobId, JobStoreError> {
        let mut jobs = self.jobs.write().map_err(|_| poisoned())?;
        if jobs.contains_key(&job.id) {
            return Err(JobStoreError::AlreadyExists(job.id));
        }
        let id = job.id;
        jobs.insert(id, job);
        Ok(id)
    }

    fn get(&self, job_id: JobId) -> Result<Option<Job>, JobStoreError> {
        let jobs = self.jobs.read().map_err(|_| poisoned())?;
        Ok(jobs.get(&job_id).cloned())
    }

    fn list_by_type(&self, job_type: &str, limit: usize) -> Result<Vec<Job>, JobStoreError> {
        let jobs = self.jobs.read().map_err(|_| poisoned())?;
        let mut result: Vec<_> = jobs
            .values()
            .filter(|j| j.job_type == job_type)
            .cloned()
            .collect();

        // UUIDv7 ids break ties between jobs created in the same instant.
        result.sort_by_key(|j| (j.created_at, *j.id.as_uuid()));
        result.truncate(limit);
        Ok(result)
    }

    fn pending_count(&self) -> Result<usize, JobStoreError> {
        let jobs = self.jobs.read().map_err(|_| poisoned())?;
        Ok(jobs
            .values()
            .filter(|j| j.status == JobStatus::Pending)
            .count())
    }
}

impl<S> JobStore for Arc<S>
where
    S: JobStore + ?Sized,
{
    fn enqueue(&self, job: Job) -> Result<JobId, JobStoreError> {
        (**self).enqueue(job)
    }

    fn get(&self, job_id: JobId) -> Result<Option<Job>, JobStoreError> {
        (**self).get(job_id)
    }

    fn list_by_type(&self, job_type: &str, limit: usize) -> Result<Vec<Job>, JobStoreError> {
        (**self).list_by_type(job_type, limit)
    }

    fn pending_count(&self) -> Result<usize, JobStoreError> {
        (**self).pending_count()
    }
}
