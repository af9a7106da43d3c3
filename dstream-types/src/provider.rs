use futures::Stream;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

use crate::{CancelSignal, Envelope, ProviderContext, ProviderResult};

/// Common interface of input providers, to be driven by a host.
///
/// A host deserializes [`InputProvider::Config`] from its configuration payload, constructs the
/// provider, then pulls envelopes from [`InputProvider::read`] one at a time, forwarding each to its
/// own output. Production is lazy: nothing happens until the host polls the stream.
pub trait InputProvider: Sized + Send {
    /// Name used to prefix diagnostic lines.
    const NAME: &'static str;

    /// Missing configuration fields fall back to `Default`.
    type Config: DeserializeOwned + Default + Debug + Send;

    type Data: Serialize + Send;

    /// Ends when the provider finishes on its own or `signal` fires.
    type Stream: Stream<Item = ProviderResult<Envelope<Self::Data>>> + Send + Unpin;

    fn new(config: Self::Config) -> Self;

    fn config(&self) -> &Self::Config;

    fn read(&self, ctx: ProviderContext, signal: CancelSignal) -> Self::Stream;
}
