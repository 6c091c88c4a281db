//! Shared provisioning context.
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::exec::Executor;
use crate::logging::Log;

/// Shared context for provisioning actions.
pub struct Context {
    /// Configuration for the run; constant once the run starts.
    pub config: Arc<Config>,
    /// Logger for notices and step recording.
    pub log: Arc<dyn Log>,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("root", &self.config.root)
            .field("log", &"<dyn Log>")
            .field("executor", &"<dyn Executor>")
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Creates a new context for a provisioning run.
    #[must_use]
    pub fn new(config: Config, log: Arc<dyn Log>, executor: Arc<dyn Executor>) -> Self {
        Self {
            config: Arc::new(config),
            log,
            executor,
        }
    }

    /// Root directory the tree is created under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.config.root
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::MemoryLog;
    use crate::resources::test_helpers::FakeExecutor;

    #[test]
    fn root_comes_from_config() {
        let ctx = Context::new(
            Config::new("/home/u/dev"),
            Arc::new(MemoryLog::new()),
            Arc::new(FakeExecutor::new()),
        );
        assert_eq!(ctx.root(), Path::new("/home/u/dev"));
    }

    #[test]
    fn debug_hides_trait_objects() {
        let ctx = Context::new(
            Config::new("/r"),
            Arc::new(MemoryLog::new()),
            Arc::new(FakeExecutor::new()),
        );
        let dbg = format!("{ctx:?}");
        assert!(dbg.contains("<dyn Executor>"), "{dbg}");
    }
}
