//! Opt-in repository install hook.
//!
//! A repository opts in by shipping [`BOOTSTRAP_INSTALL_SCRIPT`] at its root.
//! There is no manifest or registration: the file's presence is the whole
//! activation signal.
use std::path::{Path, PathBuf};

use crate::config::BOOTSTRAP_INSTALL_SCRIPT;
use crate::config::repos::repo_name;
use crate::error::ProvisionError;
use crate::exec::{Executor, ProcessExit};

/// What happened when a repository's install hook was considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The repository has no install hook.
    Absent,
    /// The install hook ran and exited successfully.
    Ran,
}

/// The install hook of one cloned repository.
pub struct InstallHook<'a> {
    /// Repository root (the clone destination).
    pub repo: PathBuf,
    /// Executor for running `bash`.
    executor: &'a dyn Executor,
}

impl std::fmt::Debug for InstallHook<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallHook")
            .field("repo", &self.repo)
            .field("executor", &"<dyn Executor>")
            .finish()
    }
}

impl<'a> InstallHook<'a> {
    /// Create the hook handle for the repository rooted at `repo`.
    #[must_use]
    pub fn new(repo: &Path, executor: &'a dyn Executor) -> Self {
        Self {
            repo: repo.to_path_buf(),
            executor,
        }
    }

    /// Repository name used in notices and errors.
    #[must_use]
    pub fn name(&self) -> String {
        repo_name(&self.repo)
    }

    /// Path of the hook script.
    #[must_use]
    pub fn script(&self) -> PathBuf {
        self.repo.join(BOOTSTRAP_INSTALL_SCRIPT)
    }

    /// Whether the repository ships a hook script.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.script().is_file()
    }

    fn hook_error(&self, exit: ProcessExit) -> ProvisionError {
        ProvisionError::Hook {
            repo: self.name(),
            exit,
        }
    }

    /// Run the hook with `bash` from the repository root, if present.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Hook`] if `bash` is unavailable, cannot be
    /// started, or the script exits non-zero.
    pub fn run(&self) -> Result<HookOutcome, ProvisionError> {
        if !self.is_present() {
            return Ok(HookOutcome::Absent);
        }
        if !self.executor.which("bash") {
            return Err(self.hook_error(ProcessExit::NotStarted(
                "bash not found on PATH".to_string(),
            )));
        }
        let script = self.script();
        let script = script.to_string_lossy();
        let result = self
            .executor
            .run_interactive(&self.repo, "bash", &[&script])
            .map_err(|e| self.hook_error(ProcessExit::NotStarted(format!("{e:#}"))))?;
        if !result.success {
            return Err(self.hook_error(result.exit()));
        }
        Ok(HookOutcome::Ran)
    }
}
