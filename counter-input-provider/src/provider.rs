use dstream::{serde_timestamp, CancelSignal, InputProvider, ProviderContext, Timestamp};
use serde::{Deserialize, Serialize};

use crate::{CounterConfig, CounterStream};

/// Value of the `source` metadata entry.
pub const SOURCE: &str = "counter-input-provider";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterData {
    pub value: i64,
    #[serde(with = "serde_timestamp")]
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone)]
/// Generates sequential numbers with timestamps.
pub struct CounterInputProvider {
    config: CounterConfig,
}

impl InputProvider for CounterInputProvider {
    const NAME: &'static str = "CounterInputProvider";

    type Config = CounterConfig;
    type Data = CounterData;
    type Stream = CounterStream;

    fn new(config: CounterConfig) -> Self {
        Self { config }
    }

    fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Produce a counter every `interval` milliseconds. Each call starts a fresh count from 1.
    fn read(&self, ctx: ProviderContext, signal: CancelSignal) -> CounterStream {
        CounterStream::new(self.config.clone(), ctx, signal)
    }
}
