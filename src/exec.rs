//! External process execution.
//!
//! The bootstrapper only ever talks to two external programs, `git` and
//! `bash`, and treats both as black boxes identified by their exit status.
//! Processes run attached to the terminal so credential prompts, progress
//! output and interactive install scripts behave as if typed by hand.
use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// How an external process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessExit {
    /// The process exited with a status code.
    Code(i32),
    /// The process was terminated by a signal.
    Signal,
    /// The process could not be started.
    NotStarted(String),
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "exit {code}"),
            Self::Signal => f.write_str("terminated by signal"),
            Self::NotStarted(reason) => write!(f, "not started: {reason}"),
        }
    }
}

/// Result of a command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
}

impl ExecResult {
    /// Result of a process that exited with `code`.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        Self {
            success: code == 0,
            code: Some(code),
        }
    }

    /// How the process ended.
    #[must_use]
    pub const fn exit(self) -> ProcessExit {
        match self.code {
            Some(code) => ProcessExit::Code(code),
            None => ProcessExit::Signal,
        }
    }
}

impl From<ExitStatus> for ExecResult {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Abstraction over process execution, injectable for tests.
#[cfg_attr(test, mockall::automock)]
pub trait Executor: Send + Sync {
    /// Run `program` with `args` in `dir`, inheriting stdin, stdout and stderr.
    ///
    /// A non-zero exit is *not* an error here; inspect [`ExecResult::success`].
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run_interactive<'a>(
        &self,
        dir: &Path,
        program: &str,
        args: &[&'a str],
    ) -> Result<ExecResult>;

    /// Check whether `program` is available on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_interactive<'a>(
        &self,
        dir: &Path,
        program: &str,
        args: &[&'a str],
    ) -> Result<ExecResult> {
        let status = Command::new(program)
            .args(args)
            .current_dir(dir)
            .status()
            .with_context(|| format!("failed to execute: {program} in {}", dir.display()))?;
        Ok(ExecResult::from(status))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
