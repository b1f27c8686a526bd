//! Map views: the last active viewport and saved shared views

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::legend::LegendManifest;

/// Default projection of new projects
pub const DEFAULT_PROJECTION: &str = "EPSG:3857";

/// Map viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub resolution: f64,
    #[serde(default)]
    pub rotation: f64,
    pub projection: ProjectionRef,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for MapView {
    /// World view in web mercator
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            resolution: 39_135.758_482_010_24,
            rotation: 0.0,
            projection: ProjectionRef::new(DEFAULT_PROJECTION),
            extra: Map::new(),
        }
    }
}

/// Projection reference by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionRef {
    pub name: String,
}

impl ProjectionRef {
    /// Create projection reference
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Saved view shared with project visitors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedView {
    pub id: String,

    pub view: MapView,

    /// View legend, embedded from 0.7 on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendManifest>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
