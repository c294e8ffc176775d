//! Configuration schema definitions.
//!
//! This module defines the static configuration of the reload
//! subsystem. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::resilience::retry::PollPolicy;

/// Root configuration for the reload subsystem.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ReloadConfig {
    /// Quiescence polling behavior.
    pub poller: PollerConfig,

    /// Watch declarations registered at startup.
    pub watch: Vec<WatchConfig>,
}

/// Quiescence polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PollerConfig {
    /// Maximum status checks before a job proceeds anyway.
    pub max_attempts: u32,

    /// Fixed delay between checks, in milliseconds.
    pub interval_ms: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            interval_ms: 3000,
        }
    }
}

impl PollerConfig {
    /// Convert to the retry helper's policy type.
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            max_attempts: self.max_attempts,
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

/// One watch declaration: the property names whose change rebuilds a
/// pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchConfig {
    /// Configuration keys to monitor.
    pub properties: Vec<String>,

    /// Base id of the pipeline to rebuild when any of them changes.
    pub pipeline: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReloadConfig::default();
        assert_eq!(config.poller.max_attempts, 10);
        assert_eq!(config.poller.interval_ms, 3000);
        assert!(config.watch.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let config: ReloadConfig = toml::from_str(
            r#"
            [poller]
            max_attempts = 5
            interval_ms = 250

            [[watch]]
            properties = ["db.host", "db.port"]
            pipeline = "orders"

            [[watch]]
            properties = ["cache.endpoint"]
            pipeline = "quotes"
            "#,
        )
        .unwrap();

        assert_eq!(config.poller.max_attempts, 5);
        assert_eq!(config.watch.len(), 2);
        assert_eq!(config.watch[0].pipeline, "orders");
        assert_eq!(config.watch[1].properties, ["cache.endpoint"]);

        let policy = config.poller.poll_policy();
        assert_eq!(policy.interval, Duration::from_millis(250));
    }
}
