//! 0.3 -> 0.4: WMS layers accept several urls, project projection goes away
//!
//! The single `remoteUrl` becomes the first entry of `remoteUrls`. Url values
//! may be ciphertext at this point; they are moved, never decrypted.

use abc_project::{LayerManifest, ProjectSet, WmsMetadata};

use crate::error::Result;
use crate::step::{version_below, MigrationStep};

const NEXT: &str = "0.4.0";

/// Move WMS `remoteUrl` into `remoteUrls`
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiUrlWms;

impl MultiUrlWms {
    /// Create step
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn merge_urls(metadata: &mut WmsMetadata) {
    let urls = metadata.remote_urls.get_or_insert_with(Vec::new);
    if let Some(legacy) = metadata.remote_url.take() {
        if !urls.contains(&legacy) {
            urls.insert(0, legacy);
        }
    }
}

#[async_trait::async_trait]
impl MigrationStep for MultiUrlWms {
    fn name(&self) -> &'static str {
        "multi-url-wms"
    }

    fn target_version(&self) -> &'static str {
        NEXT
    }

    async fn interested_by(&self, project: &ProjectSet) -> Result<bool> {
        version_below(project, NEXT)
    }

    async fn migrate(&self, project: ProjectSet) -> Result<ProjectSet> {
        let ProjectSet { mut manifest, files } = project;

        let mut merged = 0_usize;
        for layer in &mut manifest.layers {
            match layer {
                LayerManifest::Wms(wms) => {
                    merge_urls(&mut wms.metadata);
                    merged += 1;
                }
                LayerManifest::Predefined(_)
                | LayerManifest::Vector(_)
                | LayerManifest::Wmts(_)
                | LayerManifest::Xyz(_) => {}
            }
        }
        if manifest.metadata.projection.take().is_some() {
            tracing::debug!("Legacy project projection removed");
        }
        tracing::debug!(layers = merged, "WMS urls merged");

        manifest.metadata.version = NEXT.to_string();
        Ok(ProjectSet::new(manifest, files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abc_project::{
        LayerBody, PredefinedMetadata, ProjectManifest, VectorMetadata, WmtsMetadata, XyzMetadata,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn wms(metadata: WmsMetadata) -> LayerManifest {
        LayerManifest::Wms(LayerBody::new(metadata))
    }

    async fn run(manifest: ProjectManifest) -> ProjectManifest {
        MultiUrlWms::new()
            .migrate(ProjectSet::from_manifest(manifest))
            .await
            .unwrap()
            .manifest
    }

    fn urls_of(manifest: &ProjectManifest) -> Vec<Option<Vec<String>>> {
        manifest
            .wms_layers()
            .map(|l| l.metadata.remote_urls.clone())
            .collect()
    }

    #[tokio::test]
    async fn single_url_becomes_list() {
        let manifest = ProjectManifest::new("0.3.0").with_layer(wms(WmsMetadata {
            remote_url: Some("encrypted:abc".into()),
            ..WmsMetadata::default()
        }));

        let migrated = run(manifest).await;

        let layer = &migrated.wms_layers().next().unwrap().metadata;
        assert_eq!(layer.remote_url, None);
        assert_eq!(layer.remote_urls, Some(vec!["encrypted:abc".to_string()]));
        assert_eq!(migrated.version(), "0.4.0");
    }

    #[tokio::test]
    async fn legacy_url_goes_first_without_duplicates() {
        let manifest = ProjectManifest::new("0.3.0")
            .with_layer(wms(WmsMetadata {
                remote_url: Some("encrypted:a".into()),
                remote_urls: Some(vec!["encrypted:b".into()]),
                ..WmsMetadata::default()
            }))
            .with_layer(wms(WmsMetadata {
                remote_url: Some("encrypted:c".into()),
                remote_urls: Some(vec!["encrypted:d".into(), "encrypted:c".into()]),
                ..WmsMetadata::default()
            }));

        let migrated = run(manifest).await;

        assert_eq!(
            urls_of(&migrated),
            vec![
                Some(vec!["encrypted:a".to_string(), "encrypted:b".to_string()]),
                Some(vec!["encrypted:d".to_string(), "encrypted:c".to_string()]),
            ]
        );
    }

    #[tokio::test]
    async fn layer_without_url_gets_empty_list() {
        let manifest = ProjectManifest::new("0.3.0").with_layer(wms(WmsMetadata::default()));
        let migrated = run(manifest).await;
        assert_eq!(urls_of(&migrated), vec![Some(vec![])]);
    }

    #[tokio::test]
    async fn other_layers_untouched() {
        let xyz = LayerManifest::Xyz(LayerBody::new(XyzMetadata {
            remote_url: Some("https://tile.example.org/{z}/{x}/{y}.png".into()),
            ..XyzMetadata::default()
        }));
        let manifest = ProjectManifest::new("0.3.0").with_layer(xyz.clone());

        let migrated = run(manifest).await;
        assert_eq!(migrated.layers, vec![xyz]);
    }

    #[tokio::test]
    async fn only_wms_layers_are_reshaped() {
        let others = vec![
            LayerManifest::Predefined(LayerBody::new(PredefinedMetadata::default())),
            LayerManifest::Vector(LayerBody::new(VectorMetadata::default())),
            LayerManifest::Wmts(LayerBody::new(WmtsMetadata::default())),
        ];
        let mut manifest = ProjectManifest::new("0.3.0").with_layer(wms(WmsMetadata {
            remote_url: Some("encrypted:a".into()),
            ..WmsMetadata::default()
        }));
        manifest.layers.extend(others.clone());

        let migrated = run(manifest).await;

        assert_eq!(&migrated.layers[1..], others.as_slice());
        assert_eq!(urls_of(&migrated), vec![Some(vec!["encrypted:a".to_string()])]);
    }

    #[tokio::test]
    async fn project_projection_removed() {
        let mut manifest = ProjectManifest::new("0.3.0");
        manifest.metadata.projection = Some(json!({ "name": "EPSG:3857" }));

        let migrated = run(manifest).await;
        assert_eq!(migrated.metadata.projection, None);

        let value = migrated.to_value().unwrap();
        assert!(value["metadata"].get("projection").is_none());
    }
}
