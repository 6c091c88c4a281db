//! Domain-specific error types for the bootstrapper.
//!
//! Every failure a provisioning run can hit is a variant of
//! [`ProvisionError`].  Components return it unchanged and the dispatcher is
//! the single place that turns it into a message and an exit status.
//!
//! # Error hierarchy
//!
//! ```text
//! ProvisionError
//! ├── Io / NotADirectory   : directory creation blocked
//! ├── Clone                : `git clone` exited non-zero or could not start
//! ├── Hook                 : install hook exited non-zero or could not start
//! ├── ForeignDestination   : destination exists but is not a repository
//! ├── UnknownAction        : requested action is not defined
//! └── Config(ConfigError)  : configuration violates an invariant
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::exec::ProcessExit;

/// Top-level failure of a provisioning action.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Creating a directory failed (permissions, read-only filesystem, …).
    #[error("cannot create directory {}: {source}", .path.display())]
    Io {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A declared directory path is occupied by something that is not a directory.
    #[error("cannot create directory {}: path exists and is not a directory", .path.display())]
    NotADirectory {
        /// Path that is occupied.
        path: PathBuf,
    },

    /// The clone of a repository did not complete.
    #[error("git clone {url} into {} failed ({exit})", .dest.display())]
    Clone {
        /// Destination the repository was being cloned into.
        dest: PathBuf,
        /// Clone URL.
        url: String,
        /// How the clone process ended.
        exit: ProcessExit,
    },

    /// A repository's install hook did not complete.
    #[error("bootstrap install for {repo} failed ({exit})")]
    Hook {
        /// Repository name (last path component of the destination).
        repo: String,
        /// How the hook process ended.
        exit: ProcessExit,
    },

    /// A destination exists, is not empty, and has no `.git` directory.
    #[error("{} exists but is not a git repository", .dest.display())]
    ForeignDestination {
        /// Occupied destination path.
        dest: PathBuf,
    },

    /// An action name that the configuration does not define.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// The configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Violations of configuration invariants, detected before any side effect.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A repository destination is not an absolute path.
    #[error("destination {} in group '{group}' is not absolute", .dest.display())]
    RelativeDestination {
        /// Label of the group declaring the destination.
        group: String,
        /// Offending destination.
        dest: PathBuf,
    },

    /// Two entries target the same destination.
    #[error("destination {} is declared by both '{first}' and '{second}'", .dest.display())]
    DuplicateDestination {
        /// Shared destination.
        dest: PathBuf,
        /// Label of the group that declared it first.
        first: String,
        /// Label of the group that declared it again.
        second: String,
    },

    /// Two actions share a name.
    #[error("action '{0}' is defined more than once")]
    DuplicateAction(String),

    /// A composite refers to an action that does not exist.
    #[error("composite '{composite}' refers to unknown action '{step}'")]
    UnknownStep {
        /// Composite declaring the step.
        composite: String,
        /// Name of the missing action.
        step: String,
    },

    /// Composite actions invoke each other in a loop.
    #[error("composite actions form a cycle: {0}")]
    CompositeCycle(String),
}
