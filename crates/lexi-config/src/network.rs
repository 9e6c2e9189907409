use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_hosts() -> Vec<String> {
    vec!["https://lexipark.onrender.com".to_string()]
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    2
}

fn default_backoff_ms() -> u64 {
    250
}

fn default_teardown_timeout_ms() -> u64 {
    2000
}

/// API hosts and request discipline
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    /// Candidate base URLs in priority order; the first one is the primary host
    #[serde(default = "default_hosts")]
    pub hosts: Vec<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Attempts per request for transient failures (1 = no retry)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// First retry delay, doubled after every failed attempt
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
    /// How long the final flush may hold page teardown
    #[serde(default = "default_teardown_timeout_ms")]
    pub teardown_timeout_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            hosts: default_hosts(),
            timeout_seconds: default_timeout_seconds(),
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
            teardown_timeout_ms: default_teardown_timeout_ms(),
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        let hosts = env::var("LEXI_API_HOSTS")
            .ok()
            .map(|v| parse_hosts(&v))
            .filter(|hosts| !hosts.is_empty())
            .unwrap_or_else(default_hosts);

        let timeout_seconds = env::var("LEXI_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        let max_attempts = env::var("LEXI_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_max_attempts);

        let backoff_ms = env::var("LEXI_BACKOFF_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_backoff_ms);

        let teardown_timeout_ms = env::var("LEXI_TEARDOWN_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_teardown_timeout_ms);

        Self {
            hosts,
            timeout_seconds,
            max_attempts,
            backoff_ms,
            teardown_timeout_ms,
        }
    }

    pub fn primary_host(&self) -> Option<&str> {
        self.hosts.first().map(String::as_str)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    pub fn teardown_timeout(&self) -> Duration {
        Duration::from_millis(self.teardown_timeout_ms)
    }
}

/// Comma separated list, trailing slashes dropped
pub fn parse_hosts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|h| h.trim().trim_end_matches('/'))
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}
