use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_hover_threshold_ms() -> u64 {
    1000
}

fn default_recall_debounce_ms() -> u64 {
    1000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TrackingConfig {
    /// A hover on a known word longer than this counts as a lookup
    #[serde(default = "default_hover_threshold_ms")]
    pub hover_threshold_ms: u64,
    /// Quiet period before buffered recall interactions are sent
    #[serde(default = "default_recall_debounce_ms")]
    pub recall_debounce_ms: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            hover_threshold_ms: default_hover_threshold_ms(),
            recall_debounce_ms: default_recall_debounce_ms(),
        }
    }
}

impl TrackingConfig {
    pub fn new() -> Self {
        let hover_threshold_ms = env::var("LEXI_HOVER_THRESHOLD_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_hover_threshold_ms);

        let recall_debounce_ms = env::var("LEXI_RECALL_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_recall_debounce_ms);

        Self {
            hover_threshold_ms,
            recall_debounce_ms,
        }
    }

    pub fn hover_threshold(&self) -> Duration {
        Duration::from_millis(self.hover_threshold_ms)
    }

    pub fn recall_debounce(&self) -> Duration {
        Duration::from_millis(self.recall_debounce_ms)
    }
}
