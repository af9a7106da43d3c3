use std::io::Write;

use dstream_types::{Envelope, ProviderErr, ProviderResult};
use serde::Serialize;

#[derive(Debug)]
/// Writes envelopes as newline-delimited JSON.
pub struct EnvelopeWriter<W> {
    inner: W,
    written: u64,
}

impl<W: Write> EnvelopeWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Write one envelope and flush, so that downstream sees it immediately.
    /// Returns the number of envelopes written so far.
    pub fn write<D: Serialize>(&mut self, envelope: &Envelope<D>) -> ProviderResult<u64> {
        let line = serde_json::to_string(envelope).map_err(ProviderErr::Json)?;
        writeln!(self.inner, "{line}")?;
        self.inner.flush()?;
        self.written += 1;
        Ok(self.written)
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
