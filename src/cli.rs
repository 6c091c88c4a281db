//! Command-line definition.
use clap::Parser;

/// Version string: `git describe` output when built from a checkout,
/// otherwise the package version.
pub const VERSION: &str = match option_env!("DEV_BOOTSTRAP_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Command line of the bootstrapper: exactly one action name.
///
/// There are no flags. `--help`, `--version` and anything else starting with
/// a dash are parsed as action names and rejected as unknown by the
/// dispatcher.
#[derive(Parser, Debug)]
#[command(
    name = "dev-bootstrap",
    about = "Recreate a personal development environment",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Action to run
    #[arg(allow_hyphen_values = true)]
    pub action: String,
}

/// One-line usage listing every action, printed on a malformed command line.
#[must_use]
pub fn usage(actions: &[&str]) -> String {
    format!("usage: dev-bootstrap [{}]", actions.join("|"))
}
