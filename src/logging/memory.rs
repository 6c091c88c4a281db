//! In-memory log backend.
use std::sync::Mutex;

use super::types::{Log, StepEntry, StepStatus};

/// Severity of a captured line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Stage header.
    Stage,
    /// Notice line.
    Info,
    /// Debug line.
    Debug,
    /// Warning.
    Warn,
    /// Error.
    Error,
}

/// A single captured log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Severity.
    pub level: Level,
    /// Message text.
    pub message: String,
}

/// Log backend that keeps every line and step result in memory.
///
/// Used wherever output must be inspected rather than displayed, such as
/// asserting on the exact notices a provisioning run produced.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<LogLine>>,
    steps: Mutex<Vec<StepEntry>>,
}

impl MemoryLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: Level, msg: &str) {
        if let Ok(mut guard) = self.lines.lock() {
            guard.push(LogLine {
                level,
                message: msg.to_string(),
            });
        }
    }

    /// All captured lines in emission order.
    #[must_use]
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Messages captured at `level`, in emission order.
    #[must_use]
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.level == level)
            .map(|l| l.message)
            .collect()
    }

    /// Number of captured lines starting with `prefix`, at any level.
    #[must_use]
    pub fn count_prefixed(&self, prefix: &str) -> usize {
        self.lines()
            .iter()
            .filter(|l| l.message.starts_with(prefix))
            .count()
    }

    /// All recorded step results.
    #[must_use]
    pub fn steps(&self) -> Vec<StepEntry> {
        self.steps.lock().map_or_else(|_| vec![], |g| g.clone())
    }
}

impl Log for MemoryLog {
    fn stage(&self, msg: &str) {
        self.push(Level::Stage, msg);
    }

    fn info(&self, msg: &str) {
        self.push(Level::Info, msg);
    }

    fn debug(&self, msg: &str) {
        self.push(Level::Debug, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(Level::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.push(Level::Error, msg);
    }

    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.steps.lock() {
            guard.push(StepEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}
