//! Git repository clone resource.
use std::path::{Path, PathBuf};

use super::{Resource, ResourceChange, ResourceState};
use crate::error::ProvisionError;
use crate::exec::{Executor, ProcessExit};

/// A repository that must be cloned at `dest`.
///
/// State classification:
///
/// | Destination                    | State     |
/// |--------------------------------|-----------|
/// | does not exist                 | `Missing` |
/// | empty directory                | `Missing` |
/// | contains `.git`                | `Correct` |
/// | anything else                  | `Invalid` |
///
/// An empty directory counts as missing because `git clone` accepts it as a
/// target; this is what happens when a destination is also declared in the
/// directory tree.
pub struct RepositoryResource<'a> {
    /// Clone destination.
    pub dest: PathBuf,
    /// Clone URL.
    pub url: String,
    /// Executor for running `git`.
    executor: &'a dyn Executor,
}

impl std::fmt::Debug for RepositoryResource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryResource")
            .field("dest", &self.dest)
            .field("url", &self.url)
            .field("executor", &"<dyn Executor>")
            .finish()
    }
}

impl<'a> RepositoryResource<'a> {
    /// Create a new repository resource.
    #[must_use]
    pub const fn new(dest: PathBuf, url: String, executor: &'a dyn Executor) -> Self {
        Self {
            dest,
            url,
            executor,
        }
    }

    fn clone_error(&self, exit: ProcessExit) -> ProvisionError {
        ProvisionError::Clone {
            dest: self.dest.clone(),
            url: self.url.clone(),
            exit,
        }
    }
}

/// Whether `path` is a directory with no entries.
fn is_empty_dir(path: &Path) -> Result<bool, ProvisionError> {
    if !path.is_dir() {
        return Ok(false);
    }
    let mut entries = std::fs::read_dir(path).map_err(|source| ProvisionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(entries.next().is_none())
}

impl Resource for RepositoryResource<'_> {
    fn description(&self) -> String {
        format!("{} → {}", self.url, self.dest.display())
    }

    fn current_state(&self) -> Result<ResourceState, ProvisionError> {
        if self.dest.symlink_metadata().is_err() {
            return Ok(ResourceState::Missing);
        }
        if self.dest.join(".git").exists() {
            return Ok(ResourceState::Correct);
        }
        if is_empty_dir(&self.dest)? {
            return Ok(ResourceState::Missing);
        }
        Ok(ResourceState::Invalid {
            reason: "exists but is not a git repository".to_string(),
        })
    }

    fn apply(&self) -> Result<ResourceChange, ProvisionError> {
        match self.current_state()? {
            ResourceState::Correct => return Ok(ResourceChange::AlreadyCorrect),
            ResourceState::Invalid { .. } => {
                return Err(ProvisionError::ForeignDestination {
                    dest: self.dest.clone(),
                });
            }
            ResourceState::Missing => {}
        }

        if !self.executor.which("git") {
            return Err(self.clone_error(ProcessExit::NotStarted(
                "git not found on PATH".to_string(),
            )));
        }

        let parent = self
            .dest
            .parent()
            .map_or_else(|| PathBuf::from("/"), Path::to_path_buf);
        std::fs::create_dir_all(&parent).map_err(|source| ProvisionError::Io {
            path: parent.clone(),
            source,
        })?;

        let dest = self.dest.to_string_lossy();
        let result = self
            .executor
            .run_interactive(&parent, "git", &["clone", &self.url, &dest])
            .map_err(|e| self.clone_error(ProcessExit::NotStarted(format!("{e:#}"))))?;
        if !result.success {
            return Err(self.clone_error(result.exit()));
        }
        Ok(ResourceChange::Applied)
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::FakeExecutor;

    fn resource<'a>(dest: PathBuf, executor: &'a FakeExecutor) -> RepositoryResource<'a> {
        RepositoryResource::new(dest, "git@example.com:u/r.git".to_string(), executor)
    }

    #[test]
    fn absent_destination_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let executor = FakeExecutor::new();
        let r = resource(dir.path().join("x"), &executor);
        assert_eq!(r.current_state().unwrap(), ResourceState::Missing);
    }

    #[test]
    fn empty_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("x")).unwrap();
        let executor = FakeExecutor::new();
        let r = resource(dir.path().join("x"), &executor);
        assert_eq!(r.current_state().unwrap(), ResourceState::Missing);
    }

    #[test]
    fn directory_with_git_metadata_is_correct() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("x/.git")).unwrap();
        let executor = FakeExecutor::new();
        let r = resource(dir.path().join("x"), &executor);
        assert_eq!(r.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn non_empty_foreign_directory_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("x")).unwrap();
        std::fs::write(dir.path().join("x/notes.md"), "mine").unwrap();
        let executor = FakeExecutor::new();
        let r = resource(dir.path().join("x"), &executor);
        assert!(matches!(
            r.current_state().unwrap(),
            ResourceState::Invalid { .. }
        ));
    }

    #[test]
    fn apply_clones_from_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("project/packages/curate");
        let executor = FakeExecutor::new();
        let r = resource(dest.clone(), &executor);

        assert_eq!(r.apply().unwrap(), ResourceChange::Applied);

        let calls = executor.calls_to("git");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].dir, dir.path().join("project/packages"));
        assert_eq!(
            calls[0].args,
            vec![
                "clone".to_string(),
                "git@example.com:u/r.git".to_string(),
                dest.to_string_lossy().to_string(),
            ]
        );
        assert!(dest.join(".git").is_dir());
    }

    #[test]
    fn apply_on_existing_repository_spawns_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("x/.git")).unwrap();
        let executor = FakeExecutor::new();
        let r = resource(dir.path().join("x"), &executor);
        assert_eq!(r.apply().unwrap(), ResourceChange::AlreadyCorrect);
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn apply_on_foreign_directory_fails_without_spawning() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("x")).unwrap();
        std::fs::write(dir.path().join("x/file"), "x").unwrap();
        let executor = FakeExecutor::new();
        let r = resource(dir.path().join("x"), &executor);
        assert!(matches!(
            r.apply().unwrap_err(),
            ProvisionError::ForeignDestination { .. }
        ));
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn non_zero_clone_exit_is_clone_error() {
        let dir = tempfile::tempdir().unwrap();
        let executor = FakeExecutor::new().with_git_code(128);
        let r = resource(dir.path().join("x"), &executor);
        match r.apply().unwrap_err() {
            ProvisionError::Clone { dest, exit, .. } => {
                assert_eq!(dest, dir.path().join("x"));
                assert_eq!(exit, ProcessExit::Code(128));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_git_is_clone_error_without_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let executor = FakeExecutor::new().without_tools();
        let r = resource(dir.path().join("x"), &executor);
        assert!(matches!(
            r.apply().unwrap_err(),
            ProvisionError::Clone {
                exit: ProcessExit::NotStarted(_),
                ..
            }
        ));
        assert!(executor.calls().is_empty());
    }
}
