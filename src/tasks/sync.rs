//! Repository synchronizer: clone missing repositories of a group and run
//! their install hooks.
use std::path::PathBuf;

use super::Context;
use crate::config::{RepoEntry, RepoGroup};
use crate::error::ProvisionError;
use crate::resources::hook::{HookOutcome, InstallHook};
use crate::resources::repository::RepositoryResource;
use crate::resources::{Resource, ResourceState};

/// What happened to one repository entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoOutcome {
    /// The destination was absent and has been cloned.
    Cloned {
        /// Result of the install hook that followed the clone.
        hook: HookOutcome,
    },
    /// The destination already held a repository; nothing was spawned.
    Present,
}

/// Outcome of one entry of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoReport {
    /// Clone destination.
    pub dest: PathBuf,
    /// What happened.
    pub outcome: RepoOutcome,
}

/// Result of synchronizing one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Group label.
    pub label: String,
    /// Whether the group was enabled; a disabled group has no entries here.
    pub enabled: bool,
    /// Per-entry outcomes in processing order.
    pub repos: Vec<RepoReport>,
}

impl SyncReport {
    /// Number of entries cloned by this call.
    #[must_use]
    pub fn cloned(&self) -> usize {
        self.repos
            .iter()
            .filter(|r| matches!(r.outcome, RepoOutcome::Cloned { .. }))
            .count()
    }
}

/// Synchronize every repository of `group`, in declared order.
///
/// A disabled group emits a single `[<label>] not implemented yet` notice
/// and spawns nothing.  Otherwise each absent destination is cloned and its
/// install hook considered right away; a destination that already holds a
/// repository is skipped, and its hook is never run again.
///
/// # Errors
///
/// Returns the first failure; entries after a failed clone or hook are not
/// processed.  A non-empty destination without git metadata fails with
/// [`ProvisionError::ForeignDestination`] before anything is spawned.
pub fn sync_group(ctx: &Context, group: &RepoGroup) -> Result<SyncReport, ProvisionError> {
    let mut report = SyncReport {
        label: group.label.clone(),
        enabled: group.enabled,
        repos: Vec::new(),
    };

    if !group.enabled {
        ctx.log.info(&format!("[{}] not implemented yet", group.label));
        return Ok(report);
    }

    for entry in &group.repos {
        let outcome = sync_entry(ctx, entry)?;
        report.repos.push(RepoReport {
            dest: entry.dest.clone(),
            outcome,
        });
    }

    ctx.log.debug(&format!(
        "{}: {} cloned, {} present",
        group.label,
        report.cloned(),
        report.repos.len() - report.cloned()
    ));
    Ok(report)
}

fn sync_entry(ctx: &Context, entry: &RepoEntry) -> Result<RepoOutcome, ProvisionError> {
    let resource = RepositoryResource::new(
        entry.dest.clone(),
        entry.url.clone(),
        ctx.executor.as_ref(),
    );

    match resource.current_state()? {
        ResourceState::Correct => {
            ctx.log.info(&format!("[=] exists {}", entry.dest.display()));
            Ok(RepoOutcome::Present)
        }
        ResourceState::Invalid { reason } => {
            ctx.log.debug(&format!("{}: {reason}", entry.dest.display()));
            Err(ProvisionError::ForeignDestination {
                dest: entry.dest.clone(),
            })
        }
        ResourceState::Missing => {
            ctx.log.info(&format!("[clone] {}", resource.description()));
            resource.apply()?;
            let hook = run_hook(ctx, entry)?;
            Ok(RepoOutcome::Cloned { hook })
        }
    }
}

fn run_hook(ctx: &Context, entry: &RepoEntry) -> Result<HookOutcome, ProvisionError> {
    let hook = InstallHook::new(&entry.dest, ctx.executor.as_ref());
    if !hook.is_present() {
        ctx.log
            .info(&format!("[=] no bootstrap install for {}", entry.name()));
        return Ok(HookOutcome::Absent);
    }
    ctx.log
        .info(&format!("[run] bootstrap install for {}", entry.name()));
    hook.run()
}
