use flume::{Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
/// The host side of a cancellation pair. Cancelling is idempotent; dropping the `Canceller`
/// cancels as well.
pub struct Canceller {
    sender: Mutex<Option<Sender<()>>>,
    receiver: Receiver<()>,
}

#[derive(Debug, Clone)]
/// The provider side of a cancellation pair. Cheap to clone; all clones observe the same cancellation.
///
/// Nothing is ever sent on the channel: disconnection of the sender is the broadcast.
pub struct CancelSignal {
    receiver: Receiver<()>,
    _keep_alive: Option<Arc<Sender<()>>>,
}

impl Canceller {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let (sender, receiver) = flume::bounded(0);
        Self {
            sender: Mutex::new(Some(sender)),
            receiver,
        }
    }

    /// Create a new signal bound to this canceller.
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            receiver: self.receiver.clone(),
            _keep_alive: None,
        }
    }

    pub fn cancel(&self) {
        let mut sender = match self.sender.lock() {
            Ok(sender) => sender,
            Err(poisoned) => poisoned.into_inner(),
        };
        if sender.take().is_some() {
            log::debug!("Cancellation requested");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.receiver.is_disconnected()
    }
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        let (sender, receiver) = flume::bounded(0);
        Self {
            receiver,
            _keep_alive: Some(Arc::new(sender)),
        }
    }

    /// Non-blocking check.
    pub fn is_cancelled(&self) -> bool {
        self.receiver.is_disconnected()
    }

    /// Resolves once cancellation fires. Pends forever on [`CancelSignal::never`].
    pub async fn cancelled(&self) {
        while self.receiver.recv_async().await.is_ok() {}
    }
}

/// Shorthand of `Canceller::new()` followed by `signal()`.
pub fn cancel_pair() -> (Canceller, CancelSignal) {
    let canceller = Canceller::new();
    let signal = canceller.signal();
    (canceller, signal)
}
