//! Declared directory tree.
use std::path::{Path, PathBuf};

/// A top-level directory and the subdirectories declared under it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TreeNode {
    name: String,
    children: Vec<String>,
}

/// Directory tree to ensure under the root.
///
/// Nodes keep their declaration order so that notices are emitted in the
/// order the tree was written.
///
/// # Examples
///
/// ```
/// use dev_bootstrap::config::TreeSpec;
/// use std::path::Path;
///
/// let tree = TreeSpec::new().node("env", &["editor"]).node("tools", &[]);
/// let dirs = tree.directories(Path::new("/dev"));
/// assert_eq!(dirs.len(), 3);
/// assert!(dirs[0].ends_with("env"));
/// assert!(dirs[1].ends_with("env/editor"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeSpec {
    nodes: Vec<TreeNode>,
}

impl TreeSpec {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a top-level directory with its subdirectories.
    #[must_use]
    pub fn node(mut self, name: &str, children: &[&str]) -> Self {
        self.nodes.push(TreeNode {
            name: name.to_string(),
            children: children.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// Every directory declared by the tree under `root`, each top-level
    /// directory immediately followed by its subdirectories.
    #[must_use]
    pub fn directories(&self, root: &Path) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        for node in &self.nodes {
            let base = root.join(&node.name);
            dirs.push(base.clone());
            dirs.extend(node.children.iter().map(|child| base.join(child)));
        }
        dirs
    }
}
