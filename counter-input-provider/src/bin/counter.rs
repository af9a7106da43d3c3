use anyhow::{anyhow, Result};
use clap::Parser;
use counter_input_provider::{CounterConfig, CounterInputProvider};
use dstream::{Canceller, ConfigSource, InputProvider, LogFacade, StdioHost};
use std::path::PathBuf;

/// Emits a sequential counter as JSON envelopes on stdout. Diagnostics go to stderr.
///
/// Without `--config`, the first JSON document on stdin is the configuration; empty input means defaults.
#[derive(Debug, Parser)]
struct Args {
    #[clap(long, help = "Read the JSON configuration from this file instead of stdin")]
    config: Option<PathBuf>,
    #[clap(long, value_parser = parse_interval, help = "Override the interval. e.g. 1s, 100ms")]
    interval: Option<i64>,
    #[clap(long, help = "Override the maximum count; 0 means infinite")]
    max_count: Option<i64>,
    #[clap(
        long = "log",
        help = "Send diagnostics through the logger (see RUST_LOG) instead of plain stderr lines"
    )]
    use_logger: bool,
}

/// Milliseconds; a bare number is taken as milliseconds.
fn parse_interval(src: &str) -> Result<i64> {
    let (n, scale) = if let Some(s) = src.strip_suffix("ms") {
        (s, 1)
    } else if let Some(s) = src.strip_suffix('s') {
        (s, 1000)
    } else if let Some(s) = src.strip_suffix('m') {
        (s, 60 * 1000)
    } else {
        (src, 1)
    };
    let n: i64 = n
        .parse()
        .map_err(|_| anyhow!("Failed to parse {} as interval", src))?;
    n.checked_mul(scale)
        .ok_or_else(|| anyhow!("Interval {} is out of range", src))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        config,
        interval,
        max_count,
        use_logger,
    } = Args::parse();

    let mut host = StdioHost::new().config_source(match config {
        Some(path) => ConfigSource::File(path),
        None => ConfigSource::Stdin,
    });
    if use_logger {
        host = host.log_sink(LogFacade::default());
    }
    let mut config: CounterConfig = host.load_config::<CounterInputProvider>()?;
    if let Some(interval) = interval {
        config.interval = interval;
    }
    if let Some(max_count) = max_count {
        config.max_count = max_count;
    }

    let canceller = Canceller::new();
    let signal = canceller.signal();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => canceller.cancel(),
            Err(e) => {
                log::warn!("Cannot listen for Ctrl-C: {e}");
                // dropping the canceller would cancel the run
                std::future::pending::<()>().await;
            }
        }
    });

    let report = host
        .run(CounterInputProvider::new(config), signal)
        .await?;
    log::debug!("Emitted {} envelopes", report.emitted);

    Ok(())
}
