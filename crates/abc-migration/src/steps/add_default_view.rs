//! 0.1 -> 0.2: projects remember their last viewport

use abc_project::{MapView, ProjectSet};

use crate::error::Result;
use crate::step::{version_below, MigrationStep};

const NEXT: &str = "0.2.0";

/// Insert the default map view
#[derive(Debug, Clone, Copy, Default)]
pub struct AddDefaultView;

impl AddDefaultView {
    /// Create step
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl MigrationStep for AddDefaultView {
    fn name(&self) -> &'static str {
        "add-default-view"
    }

    fn target_version(&self) -> &'static str {
        NEXT
    }

    async fn interested_by(&self, project: &ProjectSet) -> Result<bool> {
        version_below(project, NEXT)
    }

    async fn migrate(&self, project: ProjectSet) -> Result<ProjectSet> {
        let ProjectSet { mut manifest, files } = project;

        manifest.view.get_or_insert_with(MapView::default);
        manifest.metadata.version = NEXT.to_string();

        Ok(ProjectSet::new(manifest, files))
    }
}
