//! Wiring from configuration to a ready `StockWatcher`.
//!
//! Hosts call [`init`] once at startup. [`build_watcher`] skips the logging
//! setup for hosts that install their own subscriber.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use stockwatch_notifications::{JobQueue, NotificationDispatcher};

use crate::catalog::VariantCatalog;
use crate::config::{QueueBackend, StockWatchConfig};
use crate::jobs::{InMemoryJobStore, JobStoreQueue};
use crate::stock_watch::StockWatcher;

pub type SharedQueue = Arc<dyn JobQueue>;

/// Stock watcher as assembled from configuration.
pub type ConfiguredWatcher<C> = StockWatcher<C, NotificationDispatcher<SharedQueue>>;

/// Build the job queue selected by `backend`.
pub fn build_queue(backend: &QueueBackend) -> anyhow::Result<SharedQueue> {
    match backend {
        QueueBackend::InMemory => {
            info!("using in-memory job queue; queued notifications do not survive restarts");
            Ok(Arc::new(JobStoreQueue::new(InMemoryJobStore::arc())))
        }
        QueueBackend::Redis { url, stream_key } => redis_queue(url, stream_key),
    }
}

#[cfg(feature = "redis")]
fn redis_queue(url: &str, stream_key: &str) -> anyhow::Result<SharedQueue> {
    let queue = crate::jobs::RedisStreamsJobQueue::new(url, Some(stream_key.to_string()))
        .with_context(|| format!("opening redis job stream `{stream_key}`"))?;
    info!(stream_key = %stream_key, "using redis streams job queue");
    Ok(Arc::new(queue))
}

#[cfg(not(feature = "redis"))]
fn redis_queue(_url: &str, _stream_key: &str) -> anyhow::Result<SharedQueue> {
    anyhow::bail!("redis job queue requested but stockwatch-infra was built without the `redis` feature")
}

/// Assemble evaluator, dispatcher and queue around the given catalog.
pub fn build_watcher<C: VariantCatalog>(
    config: &StockWatchConfig,
    catalog: C,
) -> anyhow::Result<ConfiguredWatcher<C>> {
    let queue = build_queue(&config.queue).context("building notification job queue")?;
    let settings = config.notifications.clone();

    info!(
        threshold = %settings.threshold,
        recipients = settings.recipients.len(),
        send_email = settings.send_email,
        "stock watcher configured"
    );

    Ok(StockWatcher::from_dispatcher(
        catalog,
        NotificationDispatcher::new(queue, settings),
    ))
}

/// Install logging in the configured format, then build the watcher.
pub fn init<C: VariantCatalog>(
    config: &StockWatchConfig,
    catalog: C,
) -> anyhow::Result<ConfiguredWatcher<C>> {
    stockwatch_observability::init_with(config.log_format);
    build_watcher(config, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryVariantCatalog;

    #[test]
    fn default_config_builds_an_in_memory_watcher() {
        let config = StockWatchConfig::default();
        let watcher = build_watcher(&config, InMemoryVariantCatalog::new()).unwrap();
        assert_eq!(watcher.threshold(), config.notifications.threshold);
        assert_eq!(watcher.handler().settings(), &config.notifications);
    }

    #[test]
    fn init_installs_the_configured_subscriber() {
        let config = StockWatchConfig::from_lookup(|key| {
            (key == crate::config::ENV_LOG_FORMAT).then(|| "pretty".to_string())
        })
        .unwrap();
        assert_eq!(config.log_format, stockwatch_observability::LogFormat::Pretty);

        let watcher = init(&config, InMemoryVariantCatalog::new()).unwrap();

        assert!(::tracing::dispatcher::has_been_set());
        assert_eq!(watcher.threshold(), config.notifications.threshold);
    }

    #[cfg(not(feature = "redis"))]
    #[test]
    fn redis_backend_without_feature_is_an_error() {
        let backend = QueueBackend::Redis {
            url: "redis://127.0.0.1:6379".to_string(),
            stream_key: "stockwatch:jobs".to_string(),
        };
        let err = build_queue(&backend).err().expect("redis must be rejected");
        assert!(err.to_string().contains("`redis` feature"));
    }
}
