//! Repository groups.
//!
//! Groups bundle repositories by *which action activates them*, not by what
//! the repositories are.
use std::path::{Path, PathBuf};

/// A repository to clone: destination path and clone URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoEntry {
    /// Absolute destination path of the clone.
    pub dest: PathBuf,
    /// Clone URL passed verbatim to `git clone`.
    pub url: String,
}

impl RepoEntry {
    /// Short name of the repository (last component of the destination).
    #[must_use]
    pub fn name(&self) -> String {
        repo_name(&self.dest)
    }
}

/// Short display name for a repository rooted at `path`.
#[must_use]
pub fn repo_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().to_string(),
    )
}

/// A labelled, ordered set of repositories synchronized by one leaf action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoGroup {
    /// Group label; also the name of the leaf action that synchronizes it.
    pub label: String,
    /// Disabled groups are acknowledged but never cloned.
    pub enabled: bool,
    /// Repositories in processing order.
    pub repos: Vec<RepoEntry>,
}

impl RepoGroup {
    /// Create an enabled, empty group.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            enabled: true,
            repos: Vec::new(),
        }
    }

    /// Append a repository.
    #[must_use]
    pub fn repo(mut self, dest: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        self.repos.push(RepoEntry {
            dest: dest.into(),
            url: url.into(),
        });
        self
    }

    /// Mark the group as not yet enabled.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
