//! Migration step contract
//!
//! A step upgrades a project across exactly one version transition. The
//! orchestrator asks [`MigrationStep::interested_by`] first and only calls
//! [`MigrationStep::migrate`] on a yes.

use abc_project::{version, ProjectSet};

use crate::error::Result;

/// One version transition of the project schema
///
/// # Contract
/// - `interested_by` is a pure predicate. It usually compares the manifest
///   version with [`MigrationStep::target_version`], and may answer yes for a
///   pure version bump so versions always reach the latest step.
/// - `migrate` consumes the project and returns the upgraded one with
///   `metadata.version` set to `target_version()`.
/// - Where the version alone is not enough evidence (data saved with a stale
///   version), `migrate` also checks value level markers so that re-applying
///   it to migrated data changes nothing but the version.
#[async_trait::async_trait]
pub trait MigrationStep: Send + Sync + std::fmt::Debug {
    /// Step name (for logs and reports)
    fn name(&self) -> &'static str;

    /// Version written by `migrate`
    fn target_version(&self) -> &'static str;

    /// Whether the step may need the user
    fn capability(&self) -> StepCapability {
        StepCapability::Pure
    }

    /// Check if this step applies
    async fn interested_by(&self, project: &ProjectSet) -> Result<bool>;

    /// Check if migrating this project would prompt the user
    ///
    /// Asked only after `interested_by` said yes. Interactive steps narrow it
    /// to the data that actually needs input.
    async fn needs_interaction(&self, _project: &ProjectSet) -> Result<bool> {
        Ok(self.capability().is_interactive())
    }

    /// Apply the transition
    async fn migrate(&self, project: ProjectSet) -> Result<ProjectSet>;
}

/// Capability marker of a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StepCapability {
    /// Data reshaping only
    #[default]
    Pure,
    /// May prompt the user through a collaborator
    Interactive,
}

impl StepCapability {
    /// Check if the step may prompt
    #[inline]
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Interactive)
    }
}

/// Standard version gate: `project version < target`
///
/// # Errors
/// Returns error if either version is malformed
#[inline]
pub fn version_below(project: &ProjectSet, target: &str) -> Result<bool> {
    Ok(version::less_than(project.version(), target)?)
}
