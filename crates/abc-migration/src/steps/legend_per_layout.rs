//! 0.6 -> 0.7: each layout and shared view owns its legend
//!
//! The project wide legend is copied into every layout and shared view that
//! has none, with fresh ids so that copies can be edited independently. The
//! project legend is then removed. Projects without a legend get empty
//! hidden legends.

use abc_project::{LegendManifest, ProjectSet};

use crate::error::Result;
use crate::step::{version_below, MigrationStep};

const NEXT: &str = "0.7.0";

/// Move the project legend into layouts and shared views
#[derive(Debug, Clone, Copy, Default)]
pub struct LegendPerLayout;

impl LegendPerLayout {
    /// Create step
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl MigrationStep for LegendPerLayout {
    fn name(&self) -> &'static str {
        "legend-per-layout"
    }

    fn target_version(&self) -> &'static str {
        NEXT
    }

    async fn interested_by(&self, project: &ProjectSet) -> Result<bool> {
        version_below(project, NEXT)
    }

    async fn migrate(&self, project: ProjectSet) -> Result<ProjectSet> {
        let ProjectSet { mut manifest, files } = project;

        let template = manifest.legend.take().unwrap_or_else(LegendManifest::hidden);

        let mut copies = 0_usize;
        let layout_legends = manifest.layouts.iter_mut().map(|l| &mut l.legend);
        let view_legends = manifest
            .shared_views
            .iter_mut()
            .flatten()
            .map(|v| &mut v.legend);
        for slot in layout_legends.chain(view_legends) {
            if slot.is_none() {
                *slot = Some(template.with_fresh_ids());
                copies += 1;
            }
        }
        tracing::debug!(copies, items = template.items.len(), "Project legend distributed");

        manifest.metadata.version = NEXT.to_string();
        Ok(ProjectSet::new(manifest, files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abc_project::{
        LayoutFormat, LayoutManifest, LegendDisplay, LegendItem, MapView, ProjectManifest,
        SharedView,
    };
    use serde_json::Map;
    use std::collections::HashSet;

    fn project_legend() -> LegendManifest {
        LegendManifest {
            id: "legend-0".into(),
            display: LegendDisplay::BottomRightCorner,
            items: vec![LegendItem::new("Rivers"), LegendItem::new("Roads")],
            extra: Map::new(),
        }
    }

    fn layout(id: &str) -> LayoutManifest {
        LayoutManifest {
            id: Some(id.into()),
            format: LayoutFormat::from_id("A4_LANDSCAPE"),
            ..LayoutManifest::default()
        }
    }

    fn shared_view(id: &str) -> SharedView {
        SharedView {
            id: id.into(),
            view: MapView::default(),
            legend: None,
            extra: Map::new(),
        }
    }

    fn manifest_with_legend(legend: Option<LegendManifest>) -> ProjectManifest {
        let mut manifest = ProjectManifest::new("0.6.0")
            .with_layout(layout("l1"))
            .with_layout(layout("l2"));
        manifest.shared_views = Some(vec![shared_view("v1")]);
        manifest.legend = legend;
        manifest
    }

    async fn run(manifest: ProjectManifest) -> ProjectManifest {
        LegendPerLayout::new()
            .migrate(ProjectSet::from_manifest(manifest))
            .await
            .unwrap()
            .manifest
    }

    #[tokio::test]
    async fn legend_copied_with_fresh_ids() {
        let original = project_legend();
        let migrated = run(manifest_with_legend(Some(original.clone()))).await;

        assert_eq!(migrated.legend, None);
        assert_eq!(migrated.version(), "0.7.0");

        let copies: Vec<&LegendManifest> = migrated
            .layouts
            .iter()
            .filter_map(|l| l.legend.as_ref())
            .chain(
                migrated
                    .shared_views
                    .iter()
                    .flatten()
                    .filter_map(|v| v.legend.as_ref()),
            )
            .collect();
        assert_eq!(copies.len(), 3);

        let mut ids = HashSet::new();
        for copy in &copies {
            assert_eq!(copy.display, original.display);
            let texts: Vec<&str> = copy.items.iter().map(|i| i.text.as_str()).collect();
            assert_eq!(texts, vec!["Rivers", "Roads"]);

            assert!(ids.insert(copy.id.clone()));
            for (item, source) in copy.items.iter().zip(&original.items) {
                assert_ne!(item.id, source.id);
                assert!(ids.insert(item.id.clone()));
            }
        }
        assert!(!ids.contains(&original.id));
    }

    #[tokio::test]
    async fn missing_legend_gives_hidden_empty_legends() {
        let migrated = run(manifest_with_legend(None)).await;

        for layout in &migrated.layouts {
            let legend = layout.legend.as_ref().unwrap();
            assert_eq!(legend.display, LegendDisplay::Hidden);
            assert!(legend.items.is_empty());
        }
        let view = &migrated.shared_views.as_ref().unwrap()[0];
        assert!(view.legend.as_ref().unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn existing_legends_are_kept() {
        let own = LegendManifest {
            id: "own".into(),
            ..LegendManifest::hidden()
        };
        let mut manifest = manifest_with_legend(Some(project_legend()));
        manifest.layouts[0].legend = Some(own.clone());

        let migrated = run(manifest).await;
        assert_eq!(migrated.layouts[0].legend, Some(own));
        assert_eq!(migrated.layouts[1].legend.as_ref().unwrap().items.len(), 2);
    }

    #[tokio::test]
    async fn no_shared_views_field_is_fine() {
        let mut manifest = manifest_with_legend(Some(project_legend()));
        manifest.shared_views = None;

        let migrated = run(manifest).await;
        assert_eq!(migrated.shared_views, None);
        assert!(migrated.layouts.iter().all(|l| l.legend.is_some()));
    }
}
