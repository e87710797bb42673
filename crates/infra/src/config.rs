//! Configuration loading and representation.
//!
//! Everything comes from `STOCKWATCH_*` environment variables. Loading goes
//! through a lookup function so tests never touch the process environment.

use stockwatch_inventory::StockThreshold;
use stockwatch_notifications::{NotificationSettings, parse_recipients};
use stockwatch_observability::LogFormat;

pub const ENV_THRESHOLD: &str = "STOCKWATCH_THRESHOLD";
pub const ENV_RECIPIENTS: &str = "STOCKWATCH_RECIPIENTS";
pub const ENV_SEND_EMAIL: &str = "STOCKWATCH_SEND_EMAIL";
pub const ENV_QUEUE: &str = "STOCKWATCH_QUEUE";
pub const ENV_REDIS_URL: &str = "STOCKWATCH_REDIS_URL";
pub const ENV_REDIS_STREAM: &str = "STOCKWATCH_REDIS_STREAM";
pub const ENV_LOG_FORMAT: &str = "STOCKWATCH_LOG_FORMAT";

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_REDIS_STREAM: &str = "stockwatch:jobs";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: `{value}`")]
    Invalid { key: &'static str, value: String },
}

/// Where notification jobs are submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueueBackend {
    /// Process-local store; jobs are lost on restart. Tests/dev only.
    #[default]
    InMemory,
    /// Redis stream (requires the `redis` feature).
    Redis { url: String, stream_key: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StockWatchConfig {
    pub notifications: NotificationSettings,
    pub queue: QueueBackend,
    pub log_format: LogFormat,
}

impl StockWatchConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut notifications = NotificationSettings::default();

        if let Some(raw) = lookup(ENV_THRESHOLD) {
            let value: i64 = raw.trim().parse().map_err(|_| invalid(ENV_THRESHOLD, &raw))?;
            notifications.threshold = StockThreshold::new(value);
        }
        if let Some(raw) = lookup(ENV_RECIPIENTS) {
            notifications.recipients = parse_recipients(&raw);
        }
        if let Some(raw) = lookup(ENV_SEND_EMAIL) {
            notifications.send_email = parse_bool(&raw).ok_or_else(|| invalid(ENV_SEND_EMAIL, &raw))?;
        }

        let queue = match lookup(ENV_QUEUE) {
            None => QueueBackend::InMemory,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "memory" | "in_memory" | "in-memory" => QueueBackend::InMemory,
                "redis" => QueueBackend::Redis {
                    url: lookup(ENV_REDIS_URL).unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
                    stream_key: lookup(ENV_REDIS_STREAM)
                        .unwrap_or_else(|| DEFAULT_REDIS_STREAM.to_string()),
                },
                _ => return Err(invalid(ENV_QUEUE, &raw)),
            },
        };

        let log_format = match lookup(ENV_LOG_FORMAT) {
            None => LogFormat::default(),
            Some(raw) => raw.parse().map_err(|_| invalid(ENV_LOG_FORMAT, &raw))?,
        };

        Ok(Self {
            notifications,
            queue,
            log_format,
        })
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
