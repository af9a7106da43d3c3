use dstream::{
    runtime::timeout, CancelSignal, Envelope, Metadata, ProviderContext, ProviderResult, Timestamp,
};
use futures::{
    future::{BoxFuture, FutureExt},
    Stream,
};
use std::{
    fmt::Debug,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{CounterConfig, CounterData, SOURCE};

pub type CounterEnvelope = Envelope<CounterData>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterState {
    /// Not yet polled.
    Idle,
    Running,
    Stopped(StopReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    BoundReached,
    Cancelled,
}

/// A lazy, cancellable, time-paced stream of counter envelopes.
///
/// Nothing is produced until the stream is polled. After each envelope, the next poll first waits
/// for the configured interval; cancellation during that wait ends the stream without another envelope.
pub struct CounterStream {
    state: CounterState,
    generator: Option<Generator>,
    future: Option<BoxFuture<'static, (Generator, Option<CounterEnvelope>)>>,
}

#[derive(Debug)]
struct Generator {
    config: CounterConfig,
    ctx: ProviderContext,
    signal: CancelSignal,
    state: CounterState,
    count: i64,
}

impl Debug for CounterStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterStream")
            .field("state", &self.state)
            .finish()
    }
}

impl CounterStream {
    pub fn new(config: CounterConfig, ctx: ProviderContext, signal: CancelSignal) -> Self {
        Self {
            state: CounterState::Idle,
            generator: Some(Generator {
                config,
                ctx,
                signal,
                state: CounterState::Idle,
                count: 1,
            }),
            future: None,
        }
    }

    /// State as of the last completed poll.
    pub fn state(&self) -> CounterState {
        self.state
    }
}

impl Stream for CounterStream {
    type Item = ProviderResult<CounterEnvelope>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        if this.future.is_none() {
            let Some(mut generator) = this.generator.take() else {
                return Poll::Ready(None);
            };
            this.future = Some(
                async move {
                    let envelope = generator.next().await;
                    (generator, envelope)
                }
                .boxed(),
            );
        }
        let Some(future) = this.future.as_mut() else {
            return Poll::Ready(None);
        };
        match future.poll_unpin(cx) {
            Poll::Ready((generator, envelope)) => {
                this.future = None;
                this.state = generator.state;
                this.generator = Some(generator);
                Poll::Ready(envelope.map(Ok))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Generator {
    async fn next(&mut self) -> Option<CounterEnvelope> {
        match self.state {
            CounterState::Idle => {
                let bound = if self.config.is_bounded() {
                    format!(", max_count={}", self.config.max_count)
                } else {
                    ", infinite".to_owned()
                };
                self.ctx.log(format!(
                    "Starting counter with interval={}ms{bound}",
                    self.config.interval
                ));
                self.state = CounterState::Running;
            }
            CounterState::Running => {
                // the previous envelope has been taken; pace before producing the next
                if timeout(self.config.interval_duration(), self.signal.cancelled())
                    .await
                    .is_ok()
                {
                    return self.stop(StopReason::Cancelled);
                }
            }
            CounterState::Stopped(_) => return None,
        }

        if self.signal.is_cancelled() {
            return self.stop(StopReason::Cancelled);
        }
        if self.config.is_bounded() && self.count > self.config.max_count {
            self.ctx
                .log(format!("Reached max count {}, stopping", self.config.max_count));
            return self.stop(StopReason::BoundReached);
        }

        let envelope = self.envelope();
        self.ctx.log(format!("Emitting counter value: {}", self.count));
        self.count += 1;
        Some(envelope)
    }

    fn envelope(&self) -> CounterEnvelope {
        Envelope::new(
            CounterData {
                value: self.count,
                timestamp: Timestamp::now_utc(),
            },
            Metadata::new()
                .with("seq", self.count)
                .with("source", SOURCE)
                .with("interval_ms", self.config.interval),
        )
    }

    fn stop(&mut self, reason: StopReason) -> Option<CounterEnvelope> {
        self.state = CounterState::Stopped(reason);
        self.ctx.log("Counter stopped");
        None
    }
}
