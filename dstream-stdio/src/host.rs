use futures::StreamExt;
use std::{
    fmt::Debug,
    fs::File,
    io::{BufReader, ErrorKind, Write},
    sync::Arc,
};

use crate::{read_config, ConfigSource, EnvelopeWriter};
use dstream_types::{
    CancelSignal, InputProvider, LogSink, ProviderContext, ProviderErr, ProviderResult, StderrSink,
};

#[derive(Clone)]
/// Hosts one provider: configuration in, envelopes out on stdout, diagnostics on stderr.
pub struct StdioHost {
    source: ConfigSource,
    sink: Arc<dyn LogSink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostReport {
    /// Number of envelopes handed to the output.
    pub emitted: u64,
}

impl Debug for StdioHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdioHost")
            .field("source", &self.source)
            .finish()
    }
}

impl Default for StdioHost {
    fn default() -> Self {
        Self {
            source: ConfigSource::Stdin,
            sink: Arc::new(StderrSink),
        }
    }
}

impl StdioHost {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn config_source(mut self, source: ConfigSource) -> Self {
        self.source = source;
        self
    }

    /// Where the provider's diagnostics go. Defaults to [`StderrSink`].
    pub fn log_sink<S: LogSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Malformed configuration is fatal; it is returned to the caller as is.
    pub fn load_config<P: InputProvider>(&self) -> ProviderResult<P::Config> {
        let config: P::Config = match &self.source {
            ConfigSource::Stdin => read_config(std::io::stdin().lock()),
            ConfigSource::File(path) => read_config(BufReader::new(File::open(path)?)),
            ConfigSource::Inline(json) => read_config(json.as_bytes()),
        }?;
        log::debug!("{} configuration: {:?}", P::NAME, config);
        Ok(config)
    }

    /// Drive the provider until its stream ends, writing envelopes to stdout.
    pub async fn run<P: InputProvider>(
        &self,
        provider: P,
        signal: CancelSignal,
    ) -> ProviderResult<HostReport> {
        self.run_with_writer(provider, signal, std::io::stdout())
            .await
    }

    /// Same as [`StdioHost::run`], but into any writer.
    ///
    /// The first error yielded by the provider ends the run and is returned. If the reader on the
    /// other side of the pipe goes away, the run ends without error.
    pub async fn run_with_writer<P, W>(
        &self,
        provider: P,
        signal: CancelSignal,
        writer: W,
    ) -> ProviderResult<HostReport>
    where
        P: InputProvider,
        W: Write,
    {
        let ctx = ProviderContext::from_shared(P::NAME, self.sink.clone());
        let mut stream = provider.read(ctx, signal);
        let mut writer = EnvelopeWriter::new(writer);

        while let Some(envelope) = stream.next().await {
            match writer.write(&envelope?) {
                Ok(_) => (),
                Err(ProviderErr::Io(e)) if e.kind() == ErrorKind::BrokenPipe => {
                    log::warn!("Output closed; stopping {}", P::NAME);
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        log::debug!("{} finished after {} envelopes", P::NAME, writer.written());

        Ok(HostReport {
            emitted: writer.written(),
        })
    }
}
