//! Project manifest
//!
//! The manifest is deliberately tolerant: only `metadata.version` is required,
//! fields introduced by later schema versions are optional, and every field
//! this model does not know about is kept in an `extra` map. A manifest of any
//! known version therefore loads, migrates and saves without losing data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::layer::{LayerBody, LayerManifest, WmsMetadata};
use crate::layout::LayoutManifest;
use crate::legend::LegendManifest;
use crate::version;
use crate::view::{MapView, SharedView};

/// Versioned project document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectManifest {
    pub metadata: ProjectMetadata,

    #[serde(default)]
    pub layers: Vec<LayerManifest>,

    #[serde(default)]
    pub layouts: Vec<LayoutManifest>,

    /// Absent before 0.6
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_views: Option<Vec<SharedView>>,

    /// Absent before 0.2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<MapView>,

    /// Project wide legend, removed in 0.7
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendManifest>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectManifest {
    /// Create an empty manifest at the given version
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            metadata: ProjectMetadata::new(version),
            layers: Vec::new(),
            layouts: Vec::new(),
            shared_views: None,
            view: None,
            legend: None,
            extra: Map::new(),
        }
    }

    /// Parse from JSON text
    ///
    /// # Errors
    /// Returns error if JSON is invalid or does not describe a manifest
    #[inline]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert from a JSON value
    ///
    /// # Errors
    /// Returns error if the value does not describe a manifest
    #[inline]
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize to pretty JSON text
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[inline]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to a JSON value
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[inline]
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Raw version string
    #[inline]
    #[must_use]
    pub fn version(&self) -> &str {
        &self.metadata.version
    }

    /// Parsed version
    ///
    /// # Errors
    /// Returns error if the version is malformed
    #[inline]
    pub fn parsed_version(&self) -> Result<semver::Version> {
        version::parse_version(&self.metadata.version)
    }

    /// Replace the version
    #[inline]
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.metadata.version = version.into();
        self
    }

    /// Append a layer
    #[inline]
    #[must_use]
    pub fn with_layer(mut self, layer: LayerManifest) -> Self {
        self.layers.push(layer);
        self
    }

    /// Append a layout
    #[inline]
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutManifest) -> Self {
        self.layouts.push(layout);
        self
    }

    /// Wms layer bodies, in layer order
    pub fn wms_layers(&self) -> impl Iterator<Item = &LayerBody<WmsMetadata>> {
        self.layers.iter().filter_map(LayerManifest::as_wms)
    }
}

/// Project metadata
///
/// Grows across versions: `containsCredentials` appears in 0.3, `public` in
/// 0.6, `projection` disappears in 0.4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_credentials: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    /// Legacy project projection, superseded by per layer projections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectMetadata {
    /// Metadata with only a version
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            id: None,
            name: None,
            version: version.into(),
            contains_credentials: None,
            public: None,
            projection: None,
            extra: Map::new(),
        }
    }
}
