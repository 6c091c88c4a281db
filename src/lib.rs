//! Personal development-environment bootstrapper.
//!
//! Creates a declared directory tree, clones missing git repositories and
//! runs the opt-in `dev-bootstrap.install.sh` hook of each fresh clone.
//! Every operation is idempotent, so a run can be repeated at will and
//! `~/dev` can be deleted and recreated from scratch.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: tree, repository groups and composite actions as plain data
//! - **[`resources`]**: idempotent `check + apply` primitives (directory, clone, hook)
//! - **[`tasks`]**: the tree provisioner and the group synchronizer
//! - **[`actions`]**: the named action facade
//! - **[`dispatch`]**: command-line token to exit status
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod actions;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod exec;
pub mod logging;
pub mod resources;
pub mod tasks;
