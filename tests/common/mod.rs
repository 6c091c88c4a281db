// Shared helpers for integration tests.
//
// Provides a temporary root, a recording executor that stands in for `git`
// and `bash`, and an in-memory log, so each integration test can drive the
// dispatcher end to end without touching the network.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dev_bootstrap::config::{BOOTSTRAP_INSTALL_SCRIPT, Config};
use dev_bootstrap::dispatch;
use dev_bootstrap::exec::{ExecResult, Executor};
use dev_bootstrap::logging::{Log, MemoryLog};
use dev_bootstrap::tasks::Context;

/// A recorded process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub dir: PathBuf,
    pub program: String,
    pub args: Vec<String>,
}

/// Executor that records every invocation and simulates `git clone`.
///
/// A successful clone creates `<dest>/.git`; destinations ending in one of
/// the `hooked` suffixes additionally receive an install hook.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    invocations: Mutex<Vec<Invocation>>,
    hooked: Vec<PathBuf>,
    git_code: i32,
    bash_code: i32,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ship an install hook in clones whose destination ends with `suffix`.
    pub fn with_hook_in(mut self, suffix: &str) -> Self {
        self.hooked.push(PathBuf::from(suffix));
        self
    }

    pub const fn with_git_code(mut self, code: i32) -> Self {
        self.git_code = code;
        self
    }

    pub const fn with_bash_code(mut self, code: i32) -> Self {
        self.bash_code = code;
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().expect("lock").clone()
    }

    pub fn invocations_of(&self, program: &str) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|i| i.program == program)
            .collect()
    }
}

impl Executor for RecordingExecutor {
    fn run_interactive<'a>(
        &self,
        dir: &Path,
        program: &str,
        args: &[&'a str],
    ) -> anyhow::Result<ExecResult> {
        self.invocations.lock().expect("lock").push(Invocation {
            dir: dir.to_path_buf(),
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
        });
        match program {
            "git" => {
                if self.git_code == 0 {
                    let dest = PathBuf::from(args.last().expect("clone destination"));
                    std::fs::create_dir_all(dest.join(".git"))?;
                    if self.hooked.iter().any(|suffix| dest.ends_with(suffix)) {
                        std::fs::write(dest.join(BOOTSTRAP_INSTALL_SCRIPT), "echo hi\n")?;
                    }
                }
                Ok(ExecResult::from_code(self.git_code))
            }
            "bash" => Ok(ExecResult::from_code(self.bash_code)),
            other => anyhow::bail!("unexpected program {other}"),
        }
    }

    fn which(&self, _program: &str) -> bool {
        true
    }
}

/// An isolated provisioning root backed by a [`tempfile::TempDir`].
pub struct TestEnv {
    pub root: tempfile::TempDir,
    pub log: Arc<MemoryLog>,
    pub executor: Arc<RecordingExecutor>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_executor(RecordingExecutor::new())
    }

    pub fn with_executor(executor: RecordingExecutor) -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
            log: Arc::new(MemoryLog::new()),
            executor: Arc::new(executor),
        }
    }

    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Build a context for `config` sharing this environment's log and executor.
    pub fn context(&self, config: Config) -> Context {
        Context::new(
            config,
            Arc::clone(&self.log) as Arc<dyn Log>,
            Arc::clone(&self.executor) as Arc<dyn Executor>,
        )
    }

    /// Dispatch `args` (without program name) against `config`.
    pub fn dispatch(&self, config: Config, args: &[&str]) -> u8 {
        let ctx = self.context(config);
        let argv = std::iter::once("dev-bootstrap").chain(args.iter().copied());
        dispatch::run(argv, &ctx)
    }

    /// Dispatch `args` against the built-in configuration rooted here.
    pub fn dispatch_builtin(&self, args: &[&str]) -> u8 {
        self.dispatch(Config::builtin(self.root_path()), args)
    }

    /// Every directory and file below the root, relative and sorted.
    pub fn snapshot_tree(&self) -> Vec<String> {
        fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
            for entry in std::fs::read_dir(dir).expect("read dir") {
                let path = entry.expect("dir entry").path();
                out.push(
                    path.strip_prefix(base)
                        .expect("below root")
                        .to_string_lossy()
                        .replace('\\', "/"),
                );
                if path.is_dir() {
                    walk(base, &path, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(self.root_path(), self.root_path(), &mut out);
        out.sort();
        out
    }
}
