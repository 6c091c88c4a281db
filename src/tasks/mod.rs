//! Provisioning procedures that orchestrate resource changes.
//!
//! [`tree::ensure_tree`] and [`sync::sync_group`] are the only places that
//! emit provisioning notices; resources themselves never log.
mod context;
pub mod sync;
pub mod tree;

pub use context::Context;
pub use sync::{RepoOutcome, RepoReport, SyncReport, sync_group};
pub use tree::{TreeReport, ensure_tree};
