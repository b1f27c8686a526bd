//! Layer manifests
//!
//! A layer is a tagged union on its `type` field. Each variant owns a
//! metadata record whose shape depends on the variant; anything a variant
//! does not model (features, styles, extents) is kept in `extra` and written
//! back untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Layer manifest, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayerManifest {
    /// Built-in base map (OSM, ...)
    Predefined(LayerBody<PredefinedMetadata>),
    /// User drawn or imported features
    Vector(LayerBody<VectorMetadata>),
    /// Remote WMS service
    Wms(LayerBody<WmsMetadata>),
    /// Remote WMTS service
    Wmts(LayerBody<WmtsMetadata>),
    /// Remote XYZ tile source
    Xyz(LayerBody<XyzMetadata>),
}

impl LayerManifest {
    /// Variant discriminant
    #[inline]
    #[must_use]
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Predefined(_) => LayerKind::Predefined,
            Self::Vector(_) => LayerKind::Vector,
            Self::Wms(_) => LayerKind::Wms,
            Self::Wmts(_) => LayerKind::Wmts,
            Self::Xyz(_) => LayerKind::Xyz,
        }
    }

    /// Layer id, if the manifest carries one
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Predefined(l) => l.metadata.id.as_deref(),
            Self::Vector(l) => l.metadata.id.as_deref(),
            Self::Wms(l) => l.metadata.id.as_deref(),
            Self::Wmts(l) => l.metadata.id.as_deref(),
            Self::Xyz(l) => l.metadata.id.as_deref(),
        }
    }

    /// Wms body, if this is a Wms layer
    #[inline]
    #[must_use]
    pub fn as_wms(&self) -> Option<&LayerBody<WmsMetadata>> {
        match self {
            Self::Wms(l) => Some(l),
            _ => None,
        }
    }
}

/// Layer variant discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// See [`LayerManifest::Predefined`]
    Predefined,
    /// See [`LayerManifest::Vector`]
    Vector,
    /// See [`LayerManifest::Wms`]
    Wms,
    /// See [`LayerManifest::Wmts`]
    Wmts,
    /// See [`LayerManifest::Xyz`]
    Xyz,
}

/// Common layer envelope: typed metadata plus untyped payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerBody<M> {
    /// Variant specific metadata
    pub metadata: M,

    /// Unmodelled layer fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<M> LayerBody<M> {
    /// Wrap metadata with an empty payload
    #[inline]
    #[must_use]
    pub fn new(metadata: M) -> Self {
        Self {
            metadata,
            extra: Map::new(),
        }
    }
}

/// Predefined layer metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredefinedMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Predefined model name (`OSM`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Vector layer metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wms layer metadata
///
/// Up to 0.3 a layer carried a single `remoteUrl`; from 0.4 on it carries
/// `remoteUrls`. Both may hold `encrypted:` ciphertext from 0.3 on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WmsMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_layer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<BasicAuth>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WmsMetadata {
    /// All urls, legacy single url first
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.remote_url
            .iter()
            .chain(self.remote_urls.iter().flatten())
            .map(String::as_str)
    }
}

/// Wmts layer metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WmtsMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_layer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<BasicAuth>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Xyz layer metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XyzMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Basic authentication credentials of a remote layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}
