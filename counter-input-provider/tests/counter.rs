// cargo test --test counter --features=test -- --nocapture
#![cfg(feature = "test")]

use anyhow::Result;
use counter_input_provider::{
    CounterConfig, CounterEnvelope, CounterInputProvider, CounterState, CounterStream, StopReason,
    SOURCE,
};
use dstream::{cancel_pair, CancelSignal, InputProvider, MemorySink, ProviderContext};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::Instant;

fn start(config: CounterConfig, signal: CancelSignal) -> (CounterStream, MemorySink) {
    let _ = env_logger::try_init();
    let sink = MemorySink::new();
    let ctx = ProviderContext::new(CounterInputProvider::NAME, sink.clone());
    let stream = CounterInputProvider::new(config).read(ctx, signal);
    (stream, sink)
}

/// The paused clock may land up to a tick past a timer's deadline.
fn assert_elapsed(since: Instant, millis: u64) {
    let elapsed = since.elapsed();
    assert!(elapsed >= Duration::from_millis(millis), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(millis + 10), "{elapsed:?}");
}

fn check_envelope(envelope: &CounterEnvelope, seq: i64, interval: i64) {
    let meta = envelope.metadata();
    assert_eq!(envelope.data().value, seq);
    assert_eq!(meta.get_i64("seq"), Some(seq));
    assert_eq!(meta.get_str("source"), Some(SOURCE));
    assert_eq!(meta.get_i64("interval_ms"), Some(interval));
}

#[tokio::test(start_paused = true)]
async fn bounded_run() -> Result<()> {
    let (mut stream, sink) = start(CounterConfig::new(100, 3), CancelSignal::never());

    let mut arrivals = Vec::new();
    let mut seq = 0;
    while let Some(envelope) = stream.next().await {
        let envelope = envelope?;
        seq += 1;
        check_envelope(&envelope, seq, 100);
        arrivals.push(Instant::now());
    }
    assert_eq!(seq, 3);
    for pair in arrivals.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap >= Duration::from_millis(100), "{gap:?}");
        assert!(gap < Duration::from_millis(150), "{gap:?}");
    }
    assert_eq!(stream.state(), CounterState::Stopped(StopReason::BoundReached));
    assert!(stream.next().await.is_none());

    assert_eq!(
        sink.messages(),
        [
            "Starting counter with interval=100ms, max_count=3",
            "Emitting counter value: 1",
            "Emitting counter value: 2",
            "Emitting counter value: 3",
            "Reached max count 3, stopping",
            "Counter stopped",
        ]
    );
    assert!(sink
        .records()
        .iter()
        .all(|r| r.source == "CounterInputProvider"));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn exact_count_for_every_bound() -> Result<()> {
    for max_count in 1..=6 {
        let (stream, _) = start(CounterConfig::new(10, max_count), CancelSignal::never());
        let seqs: Vec<i64> = stream
            .map(|envelope| envelope.map(|e| e.data().value))
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<Result<_, _>>()?;
        assert_eq!(seqs, (1..=max_count).collect::<Vec<_>>());
    }

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn cancel_after_second_envelope() -> Result<()> {
    let (canceller, signal) = cancel_pair();
    let (mut stream, sink) = start(CounterConfig::new(1000, 0), signal);

    for seq in 1..=2 {
        let envelope = stream.next().await.expect("stream ended early")?;
        check_envelope(&envelope, seq, 1000);
    }
    let cancelled_at = Instant::now();
    canceller.cancel();

    assert!(stream.next().await.is_none());
    assert_eq!(Instant::now(), cancelled_at);
    assert_eq!(stream.state(), CounterState::Stopped(StopReason::Cancelled));
    assert!(stream.next().await.is_none());

    assert_eq!(
        sink.messages(),
        [
            "Starting counter with interval=1000ms, infinite",
            "Emitting counter value: 1",
            "Emitting counter value: 2",
            "Counter stopped",
        ]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn cancel_during_wait() -> Result<()> {
    let (canceller, signal) = cancel_pair();
    let (mut stream, _) = start(CounterConfig::new(1000, 0), signal);
    let started = Instant::now();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(2500)).await;
        canceller.cancel();
    });

    let mut seqs = Vec::new();
    while let Some(envelope) = stream.next().await {
        seqs.push(envelope?.data().value);
    }
    // emitted at 0, 1000 and 2000; the wait for the 4th is interrupted
    assert_eq!(seqs, [1, 2, 3]);
    assert_elapsed(started, 2500);
    assert_eq!(stream.state(), CounterState::Stopped(StopReason::Cancelled));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn cancelled_before_start() -> Result<()> {
    let (canceller, signal) = cancel_pair();
    let (mut stream, sink) = start(CounterConfig::new(1000, 5), signal);
    canceller.cancel();

    assert!(stream.next().await.is_none());
    assert_eq!(
        sink.messages(),
        [
            "Starting counter with interval=1000ms, max_count=5",
            "Counter stopped",
        ]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn dropped_canceller_stops_the_counter() -> Result<()> {
    let (canceller, signal) = cancel_pair();
    let (mut stream, _) = start(CounterConfig::new(50, 0), signal);

    assert!(stream.next().await.is_some());
    drop(canceller);
    assert!(stream.next().await.is_none());

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn lazy_until_polled() -> Result<()> {
    let (mut stream, sink) = start(CounterConfig::default(), CancelSignal::never());
    assert_eq!(stream.state(), CounterState::Idle);
    assert!(sink.records().is_empty());

    stream.next().await.expect("first envelope")?;
    assert_eq!(stream.state(), CounterState::Running);
    assert_eq!(sink.records().len(), 2);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn defaults_apply() -> Result<()> {
    let config: CounterConfig = dstream::parse_config("{}")?;
    assert_eq!(config, CounterConfig::new(1000, 0));

    let (mut stream, sink) = start(config, CancelSignal::never());
    let first = stream.next().await.expect("first envelope")?;
    check_envelope(&first, 1, 1000);

    let started = Instant::now();
    let second = stream.next().await.expect("second envelope")?;
    check_envelope(&second, 2, 1000);
    assert_elapsed(started, 1000);
    assert_eq!(
        sink.messages()[0],
        "Starting counter with interval=1000ms, infinite"
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn non_positive_interval_does_not_wait() -> Result<()> {
    for interval in [0, -250] {
        let started = Instant::now();
        let (stream, _) = start(CounterConfig::new(interval, 4), CancelSignal::never());
        let envelopes: Vec<_> = stream.collect().await;
        assert_eq!(envelopes.len(), 4);
        for (i, envelope) in envelopes.into_iter().enumerate() {
            check_envelope(&envelope?, i as i64 + 1, interval);
        }
        assert!(started.elapsed() < Duration::from_millis(10));
    }

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn negative_max_count_is_unbounded() -> Result<()> {
    let (stream, sink) = start(CounterConfig::new(5, -1), CancelSignal::never());
    let seqs: Vec<i64> = stream
        .take(20)
        .map(|envelope| envelope.map(|e| e.data().value))
        .collect::<Vec<_>>()
        .await
        .into_iter()
        .collect::<Result<_, _>>()?;
    assert_eq!(seqs, (1..=20).collect::<Vec<_>>());
    assert_eq!(
        sink.messages()[0],
        "Starting counter with interval=5ms, infinite"
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn envelope_json() -> Result<()> {
    let (mut stream, _) = start(CounterConfig::new(100, 1), CancelSignal::never());
    let envelope = stream.next().await.expect("first envelope")?;
    let json = serde_json::to_value(&envelope)?;

    assert_eq!(json["data"]["value"], 1);
    assert_eq!(
        json["metadata"],
        serde_json::json!({ "seq": 1, "source": "counter-input-provider", "interval_ms": 100 })
    );
    let timestamp = json["data"]["timestamp"].as_str().expect("timestamp string");
    assert!(timestamp.ends_with("+00:00"), "{timestamp}");

    // the wire format keeps microseconds
    let back: CounterEnvelope = serde_json::from_value(json)?;
    assert_eq!(back.metadata(), envelope.metadata());
    assert_eq!(back.data().value, envelope.data().value);
    assert_eq!(
        back.data().timestamp.unix_timestamp(),
        envelope.data().timestamp.unix_timestamp()
    );

    Ok(())
}
