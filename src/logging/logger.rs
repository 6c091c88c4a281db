//! Console logger with summary collection.
use std::sync::Mutex;

use super::types::{Log, StepEntry, StepStatus};

/// `tracing` target used for stage headers.
pub(super) const STAGE_TARGET: &str = "dev_bootstrap::stage";

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Logger that emits `tracing` events and collects leaf action results.
///
/// Formatting and destination (stdout / stderr) are decided by the
/// subscriber installed with [`init_subscriber`](super::init_subscriber).
#[derive(Debug, Default)]
pub struct Logger {
    steps: Mutex<Vec<StepEntry>>,
}

impl Logger {
    /// Create a new logger with an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log a notice line.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record a leaf action result for the summary.
    pub fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.steps.lock() {
            guard.push(StepEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// All recorded steps, in recording order.
    #[must_use]
    pub fn step_entries(&self) -> Vec<StepEntry> {
        self.steps.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log a summary of all recorded steps.
    ///
    /// Nothing is printed when fewer than two steps ran; a single action
    /// already ends with its own notices.
    pub fn print_summary(&self) {
        let steps = self.step_entries();
        if steps.len() < 2 {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut skipped = 0u32;
        let mut failed = 0u32;

        for step in &steps {
            let icon = match step.status {
                StepStatus::Ok => {
                    ok += 1;
                    "✓"
                }
                StepStatus::Skipped => {
                    skipped += 1;
                    "○"
                }
                StepStatus::Failed => {
                    failed += 1;
                    "✗"
                }
            };
            let suffix = step
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            self.info(&format!("{icon} {}{suffix}", step.name));
        }

        self.info(&format!(
            "{} actions: {ok} ok, {skipped} skipped, {failed} failed",
            steps.len()
        ));
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error);

    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        self.record_step(name, status, message);
    }
}
