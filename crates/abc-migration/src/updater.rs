//! Migration chain orchestrator
//!
//! Applies registered steps oldest transition first, threading each step's
//! output into the next.
//!
//! # Critical Invariant
//!
//! Steps run strictly one after the other. Any failure aborts the whole
//! update and no partial project is returned; the caller keeps its original
//! persisted copy as the only safe state.

use std::fmt;
use std::sync::Arc;

use abc_project::{version, ProjectSet};

use crate::config::MigrationConfig;
use crate::error::{MigrationError, Result};
use crate::step::MigrationStep;

/// Ordered chain of migration steps
#[derive(Clone)]
pub struct ProjectUpdater {
    steps: Vec<Arc<dyn MigrationStep>>,
    config: MigrationConfig,
}

impl ProjectUpdater {
    /// Create updater from steps, oldest transition first
    ///
    /// Registration order is trusted; use [`ProjectUpdater::try_new`] to
    /// check it.
    #[inline]
    #[must_use]
    pub fn new(steps: Vec<Arc<dyn MigrationStep>>) -> Self {
        Self {
            steps,
            config: MigrationConfig::default(),
        }
    }

    /// Create updater, rejecting chains whose target versions do not
    /// strictly increase
    ///
    /// # Errors
    /// - [`MigrationError::ChainOutOfOrder`] on misordered registration
    /// - [`MigrationError::Project`] if a target version is malformed
    pub fn try_new(steps: Vec<Arc<dyn MigrationStep>>) -> Result<Self> {
        for pair in steps.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if !version::less_than(previous.target_version(), next.target_version())? {
                return Err(MigrationError::ChainOutOfOrder {
                    previous: previous.name(),
                    previous_version: previous.target_version().to_string(),
                    next: next.name(),
                    next_version: next.target_version().to_string(),
                });
            }
        }
        Ok(Self::new(steps))
    }

    /// With configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: MigrationConfig) -> Self {
        self.config = config;
        self
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Registered steps, in application order
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[Arc<dyn MigrationStep>] {
        &self.steps
    }

    /// Number of registered steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if no step is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Version produced by the last step
    #[inline]
    #[must_use]
    pub fn current_version(&self) -> Option<&'static str> {
        self.steps.last().map(|s| s.target_version())
    }

    /// Upgrade a project to the latest version
    ///
    /// Returns the input unchanged if no step is interested.
    ///
    /// # Errors
    /// Returns the first error raised by a step predicate, a step migration,
    /// or a violated chain invariant.
    pub async fn update(&self, project: ProjectSet) -> Result<ProjectSet> {
        Ok(self.update_with_report(project).await?.project)
    }

    /// Upgrade a project and report which steps ran
    ///
    /// # Workflow
    /// For each step in chain order:
    /// 1. Ask `interested_by`; skip the step on no
    /// 2. Refuse the step if it needs the user and interaction is forbidden
    /// 3. Run `migrate` and check the version moved to the step target
    ///
    /// # Errors
    /// Same as [`ProjectUpdater::update`].
    pub async fn update_with_report(&self, project: ProjectSet) -> Result<UpdateReport> {
        let mut current = project;
        let mut applied = Vec::new();

        for step in &self.steps {
            if !step.interested_by(&current).await? {
                tracing::debug!(step = step.name(), version = current.version(), "Step skipped");
                continue;
            }

            if !self.config.interaction.allows_interaction()
                && step.needs_interaction(&current).await?
            {
                tracing::warn!(step = step.name(), "Interactive step refused");
                return Err(MigrationError::InteractionRequired { step: step.name() });
            }

            let before = current.version().to_string();
            current = match step.migrate(current).await {
                Ok(next) => next,
                Err(e) => {
                    tracing::error!(step = step.name(), from = %before, "Migration failed: {}", e);
                    return Err(e);
                }
            };
            let after = current.version().to_string();
            check_advanced(step.as_ref(), &before, &after)?;

            tracing::info!(step = step.name(), from = %before, to = %after, "Migration applied");
            applied.push(AppliedStep {
                name: step.name(),
                from: before,
                to: after,
            });
        }

        Ok(UpdateReport {
            project: current,
            applied,
        })
    }
}

/// Version must strictly increase and land on the step target
fn check_advanced(step: &dyn MigrationStep, before: &str, after: &str) -> Result<()> {
    let not_advanced = || MigrationError::VersionNotAdvanced {
        step: step.name(),
        before: before.to_string(),
        after: after.to_string(),
    };

    let after_parsed = version::parse_version(after).map_err(|_| not_advanced())?;
    let target = version::parse_version(step.target_version())?;
    if after_parsed != target {
        return Err(not_advanced());
    }
    if !version::less_than(before, after)? {
        return Err(not_advanced());
    }
    Ok(())
}

impl fmt::Debug for ProjectUpdater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectUpdater")
            .field(
                "steps",
                &self.steps.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish()
    }
}

/// Result of [`ProjectUpdater::update_with_report`]
#[derive(Debug, Clone)]
pub struct UpdateReport {
    /// Upgraded project
    pub project: ProjectSet,
    /// Steps that ran, in order
    pub applied: Vec<AppliedStep>,
}

impl UpdateReport {
    /// Check if any step ran
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// One applied transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedStep {
    /// Step name
    pub name: &'static str,
    /// Version before
    pub from: String,
    /// Version after
    pub to: String,
}
