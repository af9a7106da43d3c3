use std::{
    io::Write,
    sync::{Arc, Mutex},
};

/// A destination for diagnostic lines. Diagnostics are best-effort: sinks never fail.
pub trait LogSink: Send + Sync {
    fn log(&self, source: &str, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
/// Writes `[source] message` lines to stderr, keeping stdout free for data.
pub struct StderrSink;

#[derive(Debug, Clone, Copy)]
/// Forwards diagnostics to the `log` facade, with the source as target.
pub struct LogFacade {
    level: log::Level,
}

#[derive(Debug, Default, Clone)]
/// Keeps every line in memory. Clones share the same buffer.
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub source: String,
    pub message: String,
}

impl LogSink for StderrSink {
    fn log(&self, source: &str, message: &str) {
        let stderr = std::io::stderr();
        let mut stderr = stderr.lock();
        writeln!(stderr, "[{source}] {message}").ok();
    }
}

impl LogFacade {
    pub fn new(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LogFacade {
    fn default() -> Self {
        Self::new(log::Level::Info)
    }
}

impl LogSink for LogFacade {
    fn log(&self, source: &str, message: &str) {
        log::log!(target: source, self.level, "{message}");
    }
}

impl MemorySink {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Messages only, in the order they were logged.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|r| r.message.clone()).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        match self.records.lock() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl LogSink for MemorySink {
    fn log(&self, source: &str, message: &str) {
        self.lock().push(LogRecord {
            source: source.to_owned(),
            message: message.to_owned(),
        });
    }
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn log(&self, source: &str, message: &str) {
        (**self).log(source, message)
    }
}
