//! Redis Streams-backed job queue (durable, at-least-once).
//!
//! Jobs are appended with `XADD` to a single stream. Email workers read the
//! stream through their own consumer group and acknowledge with `XACK`; that
//! side lives outside this crate.
//!
//! ## Entry layout
//!
//! | field | value |
//! |---|---|
//! | `job_id` | UUIDv7 assigned at submission |
//! | `job_type` | e.g. `variant-low-stock` |
//! | `payload` | JSON-encoded job payload |

use std::sync::Arc;

use tracing::instrument;

use stockwatch_core::JobId;
use stockwatch_notifications::{JobQueue, JobSubmission, QueueError};

/// Default stream key for notification jobs
pub const DEFAULT_STREAM_KEY: &str = "stockwatch:jobs";

#[derive(Debug, Clone)]
pub struct RedisStreamsJobQueue {
    client: Arc<redis::Client>,
    stream_key: String,
}

impl RedisStreamsJobQueue {
    /// Create a queue writing to `stream_key` (default: "stockwatch:jobs").
    ///
    /// Only parses the URL; no connection is opened until the first submit.
    pub fn new(redis_url: impl AsRef<str>, stream_key: Option<String>) -> Result<Self, QueueError> {
        let client = redis::Client::open(redis_url.as_ref())
            .map_err(|e| QueueError::Unavailable(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            stream_key: stream_key.unwrap_or_else(|| DEFAULT_STREAM_KEY.to_string()),
        })
    }

    pub fn stream_key(&self) -> &str {
        &self.stream_key
    }
}

impl JobQueue for RedisStreamsJobQueue {
    #[instrument(
        skip(self, submission),
        fields(stream_key = %self.stream_key, job_type = %submission.job_type),
        err
    )]
    fn submit(&self, submission: JobSubmission) -> Result<JobId, QueueError> {
        let payload = serde_json::to_string(&submission.payload)
            .map_err(|e| QueueError::Serialization(e.to_string()))?;

        let mut conn = self
            .client
            .get_connection()
            .map_err(|e| QueueError::Unavailable(e.to_string()))?;

        let job_id = JobId::new();

        let _: String = redis::cmd("XADD")
            .arg(&self.stream_key)
            .arg("*")
            .arg("job_id")
            .arg(job_id.to_string())
            .arg("job_type")
            .arg(&submission.job_type)
            .arg("payload")
            .arg(&payload)
            .query(&mut conn)
            .map_err(|e| QueueError::Unavailable(format!("XADD failed: {}", e)))?;

        Ok(job_id)
    }
}
