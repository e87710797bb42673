//! Low-stock notification dispatch.
//!
//! Turns a [`CrossingEvent`](stockwatch_inventory::CrossingEvent) plus the
//! injected [`NotificationSettings`] into a durable job description and hands
//! it to a [`JobQueue`]. Rendering and sending the email is the queue worker's
//! business, not ours.

pub mod dispatcher;
pub mod job;
pub mod queue;
pub mod settings;

pub use dispatcher::{DispatchOutcome, NotificationDispatcher, SkipReason};
pub use job::{JobSubmission, NotificationJob, VARIANT_LOW_STOCK_JOB};
pub use queue::{JobQueue, QueueError};
pub use settings::{NotificationSettings, parse_recipients};
