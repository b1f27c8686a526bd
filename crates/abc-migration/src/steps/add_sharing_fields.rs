//! 0.5 -> 0.6: projects can be shared

use abc_project::ProjectSet;

use crate::error::Result;
use crate::step::{version_below, MigrationStep};

const NEXT: &str = "0.6.0";

/// Add `sharedViews` and `metadata.public`
#[derive(Debug, Clone, Copy, Default)]
pub struct AddSharingFields;

impl AddSharingFields {
    /// Create step
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl MigrationStep for AddSharingFields {
    fn name(&self) -> &'static str {
        "add-sharing-fields"
    }

    fn target_version(&self) -> &'static str {
        NEXT
    }

    async fn interested_by(&self, project: &ProjectSet) -> Result<bool> {
        version_below(project, NEXT)
    }

    async fn migrate(&self, project: ProjectSet) -> Result<ProjectSet> {
        let ProjectSet { mut manifest, files } = project;

        manifest.shared_views.get_or_insert_with(Vec::new);
        manifest.metadata.public.get_or_insert(false);
        manifest.metadata.version = NEXT.to_string();

        Ok(ProjectSet::new(manifest, files))
    }
}
