//! Core logging types: step entries, status, and the [`Log`] trait.

/// Outcome of one leaf action, kept for the closing summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEntry {
    /// Action name.
    pub name: String,
    /// Final status of the action.
    pub status: StepStatus,
    /// Optional detail (skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed leaf action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// The action completed.
    Ok,
    /// The action was acknowledged but did nothing (disabled group).
    Skipped,
    /// The action failed.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::Logger) emits through `tracing`;
/// [`MemoryLog`](super::MemoryLog) keeps every line in memory.  Provisioning
/// code only sees this trait.
pub trait Log: Send + Sync {
    /// Log a stage header (one per action).
    fn stage(&self, msg: &str);
    /// Log a notice line.
    fn info(&self, msg: &str);
    /// Log a debug message (hidden on the console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record a leaf action result for the summary.
    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>);
}
