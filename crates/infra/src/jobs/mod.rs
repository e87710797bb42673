//! Durable job submission.
//!
//! ## Design
//!
//! - Jobs are typed by a string (`variant-low-stock`) and carry a JSON payload
//! - Submission only: executing, retrying and dead-lettering jobs belongs to
//!   the queue's own worker processes
//! - `JobStoreQueue` adapts any `JobStore` to the `JobQueue` port
//! - `RedisStreamsJobQueue` (feature `redis`) appends jobs to a Redis stream
//!
//! ## Components
//!
//! - `Job`: persisted job record with payload and status
//! - `JobStore`: persistence for jobs (in-memory here)
//! - `JobStoreQueue`: `JobQueue` implementation on top of a store

pub mod queue;
#[cfg(feature = "redis")]
pub mod redis_streams;
pub mod store;
pub mod types;

pub use queue::JobStoreQueue;
#[cfg(feature = "redis")]
pub use redis_streams::{DEFAULT_STREAM_KEY, RedisStreamsJobQueue};
pub use store::{InMemoryJobStore, JobStore, JobStoreError};
pub use types::{Job, JobStatus};
