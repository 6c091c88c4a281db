//! Filesystem provisioner: ensure the declared directory tree.
use std::path::PathBuf;

use super::Context;
use crate::error::ProvisionError;
use crate::resources::directory::DirectoryResource;
use crate::resources::{Resource, ResourceChange};

/// Directories visited by one [`ensure_tree`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeReport {
    /// Directories created by this call, in tree order.
    pub created: Vec<PathBuf>,
    /// Directories that already existed, in tree order.
    pub present: Vec<PathBuf>,
}

/// Ensure every directory declared by the tree exists under the root.
///
/// Each directory produces exactly one notice, `[dir] <path>` when it was
/// created and `[=] dir <path>` when it was already there.  Existing
/// directories and their contents are never touched.
///
/// # Errors
///
/// Returns [`ProvisionError::Io`] or [`ProvisionError::NotADirectory`] for
/// the first directory that cannot be created; later directories are not
/// visited.
pub fn ensure_tree(ctx: &Context) -> Result<TreeReport, ProvisionError> {
    let mut report = TreeReport::default();
    for path in ctx.config.tree.directories(ctx.root()) {
        let resource = DirectoryResource::new(path);
        match resource.apply()? {
            ResourceChange::Applied => {
                ctx.log.info(&format!("[dir] {}", resource.description()));
                report.created.push(resource.path);
            }
            ResourceChange::AlreadyCorrect => {
                ctx.log.info(&format!("[=] dir {}", resource.description()));
                report.present.push(resource.path);
            }
        }
    }
    ctx.log.debug(&format!(
        "tree: {} created, {} present",
        report.created.len(),
        report.present.len()
    ));
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{Config, TreeSpec};
    use crate::logging::{Level, MemoryLog};
    use crate::resources::test_helpers::FakeExecutor;

    fn context(root: &std::path::Path, tree: TreeSpec) -> (Context, Arc<MemoryLog>) {
        let log = Arc::new(MemoryLog::new());
        let ctx = Context::new(
            Config::new(root).with_tree(tree),
            Arc::clone(&log) as Arc<dyn crate::logging::Log>,
            Arc::new(FakeExecutor::new()),
        );
        (ctx, log)
    }

    #[test]
    fn creates_nested_directories_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, log) = context(dir.path(), TreeSpec::new().node("env", &["editor"]));

        let report = ensure_tree(&ctx).unwrap();

        assert_eq!(
            report.created,
            vec![dir.path().join("env"), dir.path().join("env/editor")]
        );
        assert!(report.present.is_empty());
        assert_eq!(
            log.messages(Level::Info),
            vec![
                format!("[dir] {}", dir.path().join("env").display()),
                format!("[dir] {}", dir.path().join("env/editor").display()),
            ]
        );
    }

    #[test]
    fn second_run_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let tree = TreeSpec::new()
            .node("env", &["shell", "editor"])
            .node("tools", &[]);
        let (ctx, log) = context(dir.path(), tree);

        let first = ensure_tree(&ctx).unwrap();
        let second = ensure_tree(&ctx).unwrap();

        assert_eq!(first.created.len(), 4);
        assert!(second.created.is_empty());
        assert_eq!(second.present, first.created);
        assert_eq!(log.count_prefixed("[dir]"), 4);
        assert_eq!(log.count_prefixed("[=] dir"), 4);
    }

    #[test]
    fn existing_contents_are_untouched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("env")).unwrap();
        std::fs::write(dir.path().join("env/notes.md"), "keep").unwrap();
        let (ctx, _log) = context(dir.path(), TreeSpec::new().node("env", &["shell"]));

        let report = ensure_tree(&ctx).unwrap();

        assert_eq!(report.present, vec![dir.path().join("env")]);
        assert_eq!(report.created, vec![dir.path().join("env/shell")]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("env/notes.md")).unwrap(),
            "keep"
        );
    }

    #[test]
    fn blocked_segment_stops_the_walk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("env"), "file").unwrap();
        let tree = TreeSpec::new().node("env", &["shell"]).node("tools", &[]);
        let (ctx, log) = context(dir.path(), tree);

        let err = ensure_tree(&ctx).unwrap_err();

        assert!(matches!(err, ProvisionError::NotADirectory { .. }), "{err}");
        assert!(!dir.path().join("tools").exists());
        assert!(log.lines().is_empty());
    }

    #[test]
    fn empty_tree_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let (ctx, log) = context(dir.path(), TreeSpec::new());
        assert_eq!(ensure_tree(&ctx).unwrap(), TreeReport::default());
        assert!(log.messages(Level::Info).is_empty());
    }
}
