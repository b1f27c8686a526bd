//! 0.4 -> 0.5: layouts reference page formats by stable id
//!
//! Legacy layouts stored the French display name of their format. Names
//! that match no known format fall back to a configured id.

use abc_project::{LayoutFormat, LayoutFormats, LayoutManifest, ProjectSet};

use crate::error::Result;
use crate::step::{version_below, MigrationStep};

const NEXT: &str = "0.5.0";

/// Replace layout format names with format ids
#[derive(Debug, Clone)]
pub struct LayoutFormatIds {
    fallback: String,
}

impl LayoutFormatIds {
    /// Create step falling back to A4 landscape
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_fallback(LayoutFormats::A4_LANDSCAPE)
    }

    /// Create step with a fallback format id
    #[inline]
    #[must_use]
    pub fn with_fallback(id: impl Into<String>) -> Self {
        Self { fallback: id.into() }
    }

    fn convert(&self, layout: &mut LayoutManifest) {
        if layout.format.id.is_some() {
            return;
        }

        let name = layout.format.name.take();
        let id = match name.as_deref().and_then(LayoutFormats::by_legacy_name) {
            Some(known) => known.id.to_string(),
            None => {
                tracing::warn!(
                    layout = layout.id.as_deref().unwrap_or("<unnamed>"),
                    format = name.as_deref().unwrap_or("<none>"),
                    fallback = %self.fallback,
                    "Unknown layout format, using fallback"
                );
                self.fallback.clone()
            }
        };

        let extra = std::mem::take(&mut layout.format.extra);
        layout.format = LayoutFormat {
            extra,
            ..LayoutFormat::from_id(id)
        };
    }
}

impl Default for LayoutFormatIds {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MigrationStep for LayoutFormatIds {
    fn name(&self) -> &'static str {
        "layout-format-ids"
    }

    fn target_version(&self) -> &'static str {
        NEXT
    }

    async fn interested_by(&self, project: &ProjectSet) -> Result<bool> {
        version_below(project, NEXT)
    }

    async fn migrate(&self, project: ProjectSet) -> Result<ProjectSet> {
        let ProjectSet { mut manifest, files } = project;

        for layout in &mut manifest.layouts {
            self.convert(layout);
        }

        manifest.metadata.version = NEXT.to_string();
        Ok(ProjectSet::new(manifest, files))
    }
}
