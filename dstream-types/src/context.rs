use std::{fmt::Debug, sync::Arc};

use crate::LogSink;

#[derive(Clone)]
/// Services a host lends to a running provider.
pub struct ProviderContext {
    name: &'static str,
    sink: Arc<dyn LogSink>,
}

impl Debug for ProviderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderContext")
            .field("name", &self.name)
            .finish()
    }
}

impl ProviderContext {
    pub fn new<S: LogSink + 'static>(name: &'static str, sink: S) -> Self {
        Self::from_shared(name, Arc::new(sink))
    }

    pub fn from_shared(name: &'static str, sink: Arc<dyn LogSink>) -> Self {
        Self { name, sink }
    }

    /// Name of the provider, used as the prefix of every diagnostic line.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn log<M: AsRef<str>>(&self, message: M) {
        self.sink.log(self.name, message.as_ref())
    }
}
