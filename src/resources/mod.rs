//! Idempotent resource primitives (check + apply pattern).
pub mod directory;
pub mod hook;
pub mod repository;

use crate::error::ProvisionError;

/// Observed state of a resource.
///
/// # Examples
///
/// ```
/// use dev_bootstrap::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let blocked = ResourceState::Invalid { reason: "not a directory".into() };
///
/// assert_ne!(missing, ResourceState::Correct);
/// assert_ne!(blocked, ResourceState::Missing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist yet and can be created.
    Missing,
    /// Resource exists in the desired form.
    Correct,
    /// Something occupies the resource's place and cannot be used.
    Invalid {
        /// Why the resource cannot be applied.
        reason: String,
    },
}

/// Result of applying a resource.
///
/// # Examples
///
/// ```
/// use dev_bootstrap::resources::ResourceChange;
///
/// assert_ne!(ResourceChange::Applied, ResourceChange::AlreadyCorrect);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created.
    Applied,
    /// Resource already existed; nothing was done.
    AlreadyCorrect,
}

/// Interface for resources that can be checked and applied.
///
/// `apply` is only meaningful for a [`ResourceState::Missing`] resource;
/// callers inspect [`current_state`](Resource::current_state) first, which
/// is what makes every provisioning step idempotent.
///
/// ```ignore
/// match resource.current_state()? {
///     ResourceState::Missing => resource.apply()?,
///     ResourceState::Correct => ResourceChange::AlreadyCorrect,
///     ResourceState::Invalid { .. } => return Err(...),
/// };
/// ```
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined (I/O failure).
    fn current_state(&self) -> Result<ResourceState, ProvisionError>;

    /// Create the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be created.
    fn apply(&self) -> Result<ResourceChange, ProvisionError>;
}
