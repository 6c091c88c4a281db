//! The action facade: named, zero-argument provisioning operations.
//!
//! The table is derived from the configuration: `tree` first, then one leaf
//! per repository group, then the composites, each in declaration order.
//! Leaves do provisioning work; composites only invoke other actions.
use crate::config::{Config, TREE_ACTION};
use crate::error::{ConfigError, ProvisionError};
use crate::logging::StepStatus;
use crate::tasks::{self, Context};

/// What an action does when invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Ensure the directory tree.
    Tree,
    /// Ensure the tree, then synchronize the group with this label.
    Group(String),
    /// Invoke the named actions in order.
    Composite(Vec<String>),
}

/// A named entry of the action table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Name accepted on the command line.
    pub name: String,
    /// Behaviour.
    pub kind: ActionKind,
}

/// Name → operation table for one configuration.
///
/// # Examples
///
/// ```
/// use dev_bootstrap::actions::Actions;
/// use dev_bootstrap::config::Config;
/// use std::path::Path;
///
/// let actions = Actions::new(&Config::builtin(Path::new("/home/u/dev"))).unwrap();
/// assert!(actions.contains("env"));
/// assert!(!actions.contains("fonts"));
/// assert_eq!(actions.names().first(), Some(&"tree"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actions {
    table: Vec<Action>,
}

impl Actions {
    /// Build the table for `config`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] if the configuration is invalid;
    /// a table is never built from a configuration with composite cycles.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut table = vec![Action {
            name: TREE_ACTION.to_string(),
            kind: ActionKind::Tree,
        }];
        table.extend(config.groups.iter().map(|g| Action {
            name: g.label.clone(),
            kind: ActionKind::Group(g.label.clone()),
        }));
        table.extend(config.composites.iter().map(|c| Action {
            name: c.name.clone(),
            kind: ActionKind::Composite(c.steps.clone()),
        }));
        Ok(Self { table })
    }

    /// Action names in table order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.table.iter().map(|a| a.name.as_str()).collect()
    }

    /// Look up an action by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Action> {
        self.table.iter().find(|a| a.name == name)
    }

    /// Whether `name` is a known action.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Invoke the action called `name`.
    ///
    /// Leaf outcomes are recorded on the context's log for the run summary.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::UnknownAction`] for an unknown name,
    /// otherwise the first failure of the action or of any composite step;
    /// steps after a failure are not invoked.
    pub fn run(&self, ctx: &Context, name: &str) -> Result<(), ProvisionError> {
        let action = self
            .get(name)
            .ok_or_else(|| ProvisionError::UnknownAction(name.to_string()))?;

        match &action.kind {
            ActionKind::Tree => {
                ctx.log.stage(&action.name);
                let result = tasks::ensure_tree(ctx).map(|_| None);
                record(ctx, &action.name, result)
            }
            ActionKind::Group(label) => {
                ctx.log.stage(&action.name);
                let result = run_group(ctx, label);
                record(ctx, &action.name, result)
            }
            ActionKind::Composite(steps) => {
                ctx.log.debug(&format!("{} → {}", action.name, steps.join(", ")));
                steps.iter().try_for_each(|step| self.run(ctx, step))
            }
        }
    }
}

/// Ensure the tree then synchronize the group; returns the skip note for a
/// disabled group.
fn run_group(ctx: &Context, label: &str) -> Result<Option<&'static str>, ProvisionError> {
    let group = ctx
        .config
        .group(label)
        .ok_or_else(|| ProvisionError::UnknownAction(label.to_string()))?;
    tasks::ensure_tree(ctx)?;
    let report = tasks::sync_group(ctx, group)?;
    Ok((!report.enabled).then_some("not implemented yet"))
}

fn record(
    ctx: &Context,
    name: &str,
    result: Result<Option<&'static str>, ProvisionError>,
) -> Result<(), ProvisionError> {
    match result {
        Ok(None) => {
            ctx.log.record_step(name, StepStatus::Ok, None);
            Ok(())
        }
        Ok(Some(note)) => {
            ctx.log.record_step(name, StepStatus::Skipped, Some(note));
            Ok(())
        }
        Err(e) => {
            ctx.log.record_step(name, StepStatus::Failed, Some(&e.to_string()));
            Err(e)
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use super::*;
    use crate::config::{Composite, RepoGroup, TreeSpec};
    use crate::logging::{Level, Log, MemoryLog};
    use crate::resources::test_helpers::FakeExecutor;

    fn config(root: &Path) -> Config {
        Config::new(root)
            .with_tree(TreeSpec::new().node("env", &["shell", "editor"]))
            .with_group(RepoGroup::new("shell").repo(root.join("env/shell"), "u-shell"))
            .with_group(RepoGroup::new("editor").repo(root.join("env/editor/nvim"), "u-nvim"))
            .with_group(RepoGroup::new("projects").disabled())
            .with_composite(Composite::new("env", &["shell", "editor"]))
            .with_composite(Composite::new("all", &["env", "projects"]))
    }

    fn context(config: Config, executor: &Arc<FakeExecutor>) -> (Context, Arc<MemoryLog>) {
        let log = Arc::new(MemoryLog::new());
        let ctx = Context::new(
            config,
            Arc::clone(&log) as Arc<dyn Log>,
            Arc::clone(executor) as Arc<dyn crate::exec::Executor>,
        );
        (ctx, log)
    }

    #[test]
    fn table_order_is_tree_groups_composites() {
        let actions = Actions::new(&config(Path::new("/r"))).unwrap();
        assert_eq!(
            actions.names(),
            vec!["tree", "shell", "editor", "projects", "env", "all"]
        );
        assert_eq!(
            actions.get("env").unwrap().kind,
            ActionKind::Composite(vec!["shell".to_string(), "editor".to_string()])
        );
    }

    #[test]
    fn invalid_config_builds_no_table() {
        let cfg = config(Path::new("/r")).with_composite(Composite::new("loop", &["loop"]));
        assert!(matches!(
            Actions::new(&cfg),
            Err(ConfigError::CompositeCycle(_))
        ));
    }

    #[test]
    fn tree_action_only_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let executor = Arc::new(FakeExecutor::new());
        let (ctx, log) = context(config(dir.path()), &executor);
        let actions = Actions::new(&ctx.config).unwrap();

        actions.run(&ctx, "tree").unwrap();

        assert!(dir.path().join("env/editor").is_dir());
        assert!(executor.calls().is_empty());
        assert_eq!(log.messages(Level::Stage), vec!["tree"]);
        assert_eq!(log.steps()[0].status, StepStatus::Ok);
    }

    #[test]
    fn group_leaf_ensures_tree_before_cloning() {
        let dir = tempfile::tempdir().unwrap();
        let executor = Arc::new(FakeExecutor::new());
        let (ctx, log) = context(config(dir.path()), &executor);
        let actions = Actions::new(&ctx.config).unwrap();

        actions.run(&ctx, "editor").unwrap();

        let infos = log.messages(Level::Info);
        let first_clone = infos.iter().position(|l| l.starts_with("[clone]")).unwrap();
        assert_eq!(log.count_prefixed("[dir]"), 3);
        assert!(infos[..first_clone].iter().all(|l| l.starts_with("[dir]")));
        assert_eq!(executor.calls_to("git").len(), 1);
    }

    #[test]
    fn composite_runs_steps_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let executor = Arc::new(FakeExecutor::new());
        let (ctx, log) = context(config(dir.path()), &executor);
        let actions = Actions::new(&ctx.config).unwrap();

        actions.run(&ctx, "all").unwrap();

        assert_eq!(log.messages(Level::Stage), vec!["shell", "editor", "projects"]);
        let steps: Vec<(String, StepStatus)> =
            log.steps().into_iter().map(|s| (s.name, s.status)).collect();
        assert_eq!(
            steps,
            vec![
                ("shell".to_string(), StepStatus::Ok),
                ("editor".to_string(), StepStatus::Ok),
                ("projects".to_string(), StepStatus::Skipped),
            ]
        );
        let git_dests: Vec<String> = executor
            .calls_to("git")
            .into_iter()
            .map(|c| c.args[2].clone())
            .collect();
        assert_eq!(
            git_dests,
            vec![
                dir.path().join("env/shell").to_string_lossy().to_string(),
                dir.path().join("env/editor/nvim").to_string_lossy().to_string(),
            ]
        );
    }

    #[test]
    fn disabled_group_still_ensures_tree() {
        let dir = tempfile::tempdir().unwrap();
        let executor = Arc::new(FakeExecutor::new());
        let (ctx, log) = context(config(dir.path()), &executor);
        let actions = Actions::new(&ctx.config).unwrap();

        actions.run(&ctx, "projects").unwrap();

        assert!(dir.path().join("env/shell").is_dir());
        assert!(executor.calls().is_empty());
        assert_eq!(log.count_prefixed("[projects] not implemented yet"), 1);
    }

    #[test]
    fn failing_step_stops_the_composite() {
        let dir = tempfile::tempdir().unwrap();
        let executor = Arc::new(FakeExecutor::new().with_git_code(1));
        let (ctx, log) = context(config(dir.path()), &executor);
        let actions = Actions::new(&ctx.config).unwrap();

        let err = actions.run(&ctx, "env").unwrap_err();

        assert!(matches!(err, ProvisionError::Clone { .. }));
        assert_eq!(executor.calls_to("git").len(), 1);
        let steps = log.steps();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].name, "shell");
        assert_eq!(steps[0].status, StepStatus::Failed);
    }

    #[test]
    fn unknown_name_is_an_error_without_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let executor = Arc::new(FakeExecutor::new());
        let (ctx, log) = context(config(dir.path()), &executor);
        let actions = Actions::new(&ctx.config).unwrap();

        let err = actions.run(&ctx, "fonts").unwrap_err();

        assert!(matches!(err, ProvisionError::UnknownAction(ref n) if n == "fonts"), "{err}");
        assert_eq!(err.to_string(), "unknown action: fonts");
        assert!(log.lines().is_empty());
        assert!(!dir.path().join("env").exists());
    }
}
