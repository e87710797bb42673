use serde::{Deserialize, Serialize};

use stockwatch_inventory::StockThreshold;

/// Settings the notification pipeline reads, injected at construction.
///
/// Missing fields fall back to [`Default`]: threshold `0`, no recipients and
/// email sending enabled. With no recipients nothing is ever queued, so the
/// defaults are inert until someone configures an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub threshold: StockThreshold,
    pub recipients: Vec<String>,
    pub send_email: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            threshold: StockThreshold::ZERO,
            recipients: Vec::new(),
            send_email: true,
        }
    }
}

impl NotificationSettings {
    pub fn new(threshold: StockThreshold, recipients: Vec<String>) -> Self {
        Self {
            threshold,
            recipients,
            send_email: true,
        }
    }

    pub fn with_send_email(mut self, send_email: bool) -> Self {
        self.send_email = send_email;
        self
    }
}

/// Split a comma-separated recipient list, trimming whitespace and dropping
/// blank entries. Order is preserved.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
