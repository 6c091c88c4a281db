//! Dispatcher: one command-line token in, one exit status out.
//!
//! | Situation                         | Output                                 | Status |
//! |-----------------------------------|----------------------------------------|--------|
//! | no token, or more than one        | usage line                             | 1      |
//! | unknown token                     | `unknown action: <token>`              | 1      |
//! | action fails                      | `command '<action>' failed: <error>`   | 1      |
//! | action succeeds                   | the action's notices                   | 0      |
//!
//! Nothing touches the filesystem or spawns a process unless the token names
//! a known action of a valid configuration.
use std::ffi::OsString;

use clap::Parser as _;

use crate::actions::Actions;
use crate::cli::{self, Cli};
use crate::tasks::Context;

/// Exit status of a successful run.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status of any failed run.
pub const EXIT_FAILURE: u8 = 1;

/// Run the action named by `argv` (program name first) and return the exit
/// status.
#[must_use]
pub fn run<I, T>(argv: I, ctx: &Context) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let actions = match Actions::new(&ctx.config) {
        Ok(actions) => actions,
        Err(e) => {
            ctx.log.error(&format!("invalid configuration: {e}"));
            return EXIT_FAILURE;
        }
    };
    let names = actions.names();

    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let [_, token] = argv.as_slice() else {
        ctx.log.info(&cli::usage(&names));
        return EXIT_FAILURE;
    };

    // A lone `--` is the only token clap refuses as a value.
    let action = match Cli::try_parse_from(&argv) {
        Ok(cli) => cli.action,
        Err(e) => {
            ctx.log.debug(e.to_string().trim_end());
            token.to_string_lossy().into_owned()
        }
    };

    if !actions.contains(&action) {
        ctx.log.info(&format!("unknown action: {action}"));
        return EXIT_FAILURE;
    }

    ctx.log.debug(&format!(
        "dev-bootstrap {} (root {})",
        cli::VERSION,
        ctx.root().display()
    ));

    match actions.run(ctx, &action) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            ctx.log.error(&format!("command '{action}' failed: {e}"));
            EXIT_FAILURE
        }
    }
}
