use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_INTERVAL_MS: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Configuration of the counter input provider. Missing fields take their defaults.
///
/// No validation is performed: a non-positive `interval` means no wait between envelopes,
/// and a non-positive `max_count` means the counter never stops on its own.
pub struct CounterConfig {
    /// Milliseconds between emissions.
    pub interval: i64,
    /// Maximum number of envelopes to produce; 0 means infinite.
    #[serde(alias = "max_count")]
    pub max_count: i64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL_MS,
            max_count: 0,
        }
    }
}

impl CounterConfig {
    pub fn new(interval: i64, max_count: i64) -> Self {
        Self {
            interval,
            max_count,
        }
    }

    pub fn interval_duration(&self) -> Duration {
        u64::try_from(self.interval)
            .map(Duration::from_millis)
            .unwrap_or(Duration::ZERO)
    }

    pub fn is_bounded(&self) -> bool {
        self.max_count > 0
    }
}
