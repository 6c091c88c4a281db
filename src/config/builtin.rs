//! The built-in personal development environment.
use std::path::Path;

use super::{Composite, Config, RepoGroup, TreeSpec};

/// Build the built-in configuration under `root` (normally `~/dev`).
pub(super) fn config(root: &Path) -> Config {
    let tree = TreeSpec::new()
        .node("env", &["shell", "editor", "terminal"])
        .node("project", &["packages", "sandbox"])
        .node("tools", &[]);

    let shell = RepoGroup::new("shell").repo(
        root.join("env/shell"),
        "git@github.com:juicer149/shell-env.git",
    );

    let editor = RepoGroup::new("editor").repo(
        root.join("env/editor/nvim"),
        "git@github.com:juicer149/nvim-config.git",
    );

    let terminal = RepoGroup::new("terminal")
        .repo(
            root.join("env/terminal/wezterm"),
            "git@github.com:juicer149/wezterm-config.git",
        )
        .repo(
            root.join("env/terminal/tmux"),
            "git@github.com:juicer149/tmux-config.git",
        )
        .repo(
            root.join("env/terminal/ai"),
            "git@github.com:juicer149/ai-env.git",
        );

    let projects = RepoGroup::new("projects")
        .repo(
            root.join("project/packages/curate"),
            "git@github.com:juicer149/curate.git",
        )
        .repo(
            root.join("project/packages/architech"),
            "git@github.com:juicer149/architech.git",
        );

    Config::new(root)
        .with_tree(tree)
        .with_group(shell)
        .with_group(editor)
        .with_group(terminal)
        .with_group(projects)
        .with_composite(Composite::new("env", &["shell", "editor", "terminal"]))
        .with_composite(Composite::new("all", &["env", "projects"]))
}
