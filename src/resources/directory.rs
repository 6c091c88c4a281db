//! Directory resource.
use std::path::PathBuf;

use super::{Resource, ResourceChange, ResourceState};
use crate::error::ProvisionError;

/// A directory that must exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryResource {
    /// Directory path.
    pub path: PathBuf,
}

impl DirectoryResource {
    /// Create a new directory resource.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Resource for DirectoryResource {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn current_state(&self) -> Result<ResourceState, ProvisionError> {
        if self.path.is_dir() {
            Ok(ResourceState::Correct)
        } else if self.path.symlink_metadata().is_ok() {
            Ok(ResourceState::Invalid {
                reason: "path exists and is not a directory".to_string(),
            })
        } else {
            Ok(ResourceState::Missing)
        }
    }

    fn apply(&self) -> Result<ResourceChange, ProvisionError> {
        match self.current_state()? {
            ResourceState::Correct => Ok(ResourceChange::AlreadyCorrect),
            ResourceState::Invalid { .. } => Err(ProvisionError::NotADirectory {
                path: self.path.clone(),
            }),
            ResourceState::Missing => {
                std::fs::create_dir_all(&self.path).map_err(|source| ProvisionError::Io {
                    path: self.path.clone(),
                    source,
                })?;
                Ok(ResourceChange::Applied)
            }
        }
    }
}
