//! Provisioning configuration.
//!
//! Configuration is plain in-process data: a directory [`TreeSpec`], an
//! ordered list of [`RepoGroup`]s and the [`Composite`] actions built on top
//! of them.  The only externally supplied value is the root directory, which
//! makes it possible to point a run at a scratch root.
mod builtin;
pub mod repos;
pub mod tree;
mod validation;

use std::path::{Path, PathBuf};

pub use repos::{RepoEntry, RepoGroup};
pub use tree::TreeSpec;

/// File name of the opt-in install hook at the root of a cloned repository.
pub const BOOTSTRAP_INSTALL_SCRIPT: &str = "dev-bootstrap.install.sh";

/// Name of the leaf action that only ensures the directory tree.
pub const TREE_ACTION: &str = "tree";

/// An orchestration-only action that invokes other actions in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composite {
    /// Action name.
    pub name: String,
    /// Names of the actions to invoke, in order.
    pub steps: Vec<String>,
}

impl Composite {
    /// Create a composite from its name and step names.
    #[must_use]
    pub fn new(name: &str, steps: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            steps: steps.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Everything a provisioning run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root directory the tree is created under.
    pub root: PathBuf,
    /// Directory tree relative to `root`.
    pub tree: TreeSpec,
    /// Repository groups, one leaf action each.
    pub groups: Vec<RepoGroup>,
    /// Composite actions.
    pub composites: Vec<Composite>,
}

impl Config {
    /// Create an empty configuration rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            tree: TreeSpec::new(),
            groups: Vec::new(),
            composites: Vec::new(),
        }
    }

    /// The built-in personal environment rooted at `root`.
    #[must_use]
    pub fn builtin(root: &Path) -> Self {
        builtin::config(root)
    }

    /// Replace the directory tree.
    #[must_use]
    pub fn with_tree(mut self, tree: TreeSpec) -> Self {
        self.tree = tree;
        self
    }

    /// Append a repository group.
    #[must_use]
    pub fn with_group(mut self, group: RepoGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Append a composite action.
    #[must_use]
    pub fn with_composite(mut self, composite: Composite) -> Self {
        self.composites.push(composite);
        self
    }

    /// Look up a repository group by label.
    #[must_use]
    pub fn group(&self, label: &str) -> Option<&RepoGroup> {
        self.groups.iter().find(|g| g.label == label)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn group_lookup_by_label() {
        let config = Config::new("/r")
            .with_group(RepoGroup::new("shell").repo("/r/env/shell", "u"))
            .with_group(RepoGroup::new("editor"));
        assert_eq!(config.group("shell").unwrap().repos.len(), 1);
        assert!(config.group("editor").is_some());
        assert!(config.group("missing").is_none());
    }

    #[test]
    fn composite_new_keeps_step_order() {
        let c = Composite::new("env", &["shell", "editor", "terminal"]);
        assert_eq!(c.steps, vec!["shell", "editor", "terminal"]);
    }
}
