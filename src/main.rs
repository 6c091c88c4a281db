//! `dev-bootstrap` binary entry point.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use dev_bootstrap::config::Config;
use dev_bootstrap::dispatch;
use dev_bootstrap::exec::SystemExecutor;
use dev_bootstrap::logging::{self, Log, Logger};
use dev_bootstrap::tasks::Context;

/// Exit status after an interrupt (128 + SIGINT).
const EXIT_INTERRUPTED: i32 = 130;

/// Directory the tree is created under: `DEV_BOOTSTRAP_ROOT`, else `~/dev`.
fn resolve_root() -> Result<PathBuf> {
    if let Some(root) = std::env::var_os("DEV_BOOTSTRAP_ROOT").filter(|r| !r.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    let home = if cfg!(target_os = "windows") {
        std::env::var_os("USERPROFILE").or_else(|| std::env::var_os("HOME"))
    } else {
        std::env::var_os("HOME")
    };
    let home = home.context("HOME is not set; set DEV_BOOTSTRAP_ROOT instead")?;
    Ok(PathBuf::from(home).join("dev"))
}

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let verbose = std::env::var_os("DEV_BOOTSTRAP_VERBOSE").is_some_and(|v| !v.is_empty());
    logging::init_subscriber(verbose);

    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(dispatch::EXIT_FAILURE)
        }
    }
}

fn run() -> Result<u8> {
    let log = Arc::new(Logger::new());

    let interrupt_log = Arc::clone(&log) as Arc<dyn Log>;
    ctrlc::set_handler(move || {
        interrupt_log.warn("interrupted; partially cloned destinations are left in place");
        std::process::exit(EXIT_INTERRUPTED);
    })
    .context("installing interrupt handler")?;

    let root = resolve_root()?;
    let ctx = Context::new(
        Config::builtin(&root),
        Arc::clone(&log) as Arc<dyn Log>,
        Arc::new(SystemExecutor),
    );

    let code = dispatch::run(std::env::args_os(), &ctx);
    log.print_summary();
    Ok(code)
}
