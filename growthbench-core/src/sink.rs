//! Status Reporting
//!
//! The engine reports progress and degraded measurements through a
//! `StatusSink`. Sinks must never block or fail; the engine does not look at
//! what they do with a message.

use std::sync::{Mutex, MutexGuard};

/// Short code identifying a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// A candidate is about to be measured
    Test,
    /// A candidate invocation failed; its measurement may be skewed
    TestError,
    /// Fewer than two sizes were supplied; growth rate is disabled
    Sizes,
    /// The time budget ran out; results are incomplete
    MaxExecutionTime,
    /// Chunk size auto-tuning did not converge
    ChunkSize,
}

impl StatusCode {
    /// Wire form of the code, e.g. `TEST_ERROR`
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Test => "TEST",
            StatusCode::TestError => "TEST_ERROR",
            StatusCode::Sizes => "SIZES",
            StatusCode::MaxExecutionTime => "MAX_EXECUTION_TIME",
            StatusCode::ChunkSize => "CHUNK_SIZE",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Informational
    Info,
    /// Something degraded the measurement
    Warn,
}

/// Receiver for engine status messages
pub trait StatusSink: Send + Sync {
    /// Report an informational message
    fn info(&self, code: StatusCode, message: &str);
    /// Report a warning
    fn warn(&self, code: StatusCode, message: &str);
}

/// Forwards status messages to `tracing` under the `growthbench` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn info(&self, code: StatusCode, message: &str) {
        tracing::info!(target: "growthbench", code = %code, "{}", message);
    }

    fn warn(&self, code: StatusCode, message: &str) {
        tracing::warn!(target: "growthbench", code = %code, "{}", message);
    }
}

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl StatusSink for SilentSink {
    fn info(&self, _code: StatusCode, _message: &str) {}
    fn warn(&self, _code: StatusCode, _message: &str) {}
}

/// A message captured by `MemorySink`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Severity
    pub level: Level,
    /// Code
    pub code: StatusCode,
    /// Human-readable message
    pub message: String,
}

/// Collects messages in memory for later inspection
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<StatusEntry>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured messages
    pub fn entries(&self) -> Vec<StatusEntry> {
        self.lock().clone()
    }

    /// Number of captured messages with the given code
    pub fn count(&self, code: StatusCode) -> usize {
        self.entries().iter().filter(|e| e.code == code).count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StatusEntry>> {
        // Entries stay valid even if a previous holder panicked
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, level: Level, code: StatusCode, message: &str) {
        self.lock().push(StatusEntry {
            level,
            code,
            message: message.to_string(),
        });
    }
}

impl StatusSink for MemorySink {
    fn info(&self, code: StatusCode, message: &str) {
        self.push(Level::Info, code, message);
    }

    fn warn(&self, code: StatusCode, message: &str) {
        self.push(Level::Warn, code, message);
    }
}
