//! Print layouts and their page formats

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::legend::LegendManifest;

/// Print layout definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Page format, referenced by `name` up to 0.4 and by `id` afterwards
    #[serde(default)]
    pub format: LayoutFormat,

    /// Layout legend, embedded from 0.7 on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendManifest>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Page format reference of a layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutFormat {
    /// Stable format id (`A4_LANDSCAPE`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Legacy human readable name (`A4 Paysage`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LayoutFormat {
    /// Format referenced by stable id
    #[inline]
    #[must_use]
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Format referenced by legacy name
    #[inline]
    #[must_use]
    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Known page format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownLayoutFormat {
    /// Stable id written by current versions
    pub id: &'static str,
    /// Name written by versions up to 0.4
    pub legacy_name: &'static str,
}

impl KnownLayoutFormat {
    const fn new(id: &'static str, legacy_name: &'static str) -> Self {
        Self { id, legacy_name }
    }
}

/// Catalogue of page formats
pub struct LayoutFormats;

impl LayoutFormats {
    /// Default format, also used for unrecognized legacy names
    pub const A4_LANDSCAPE: &'static str = "A4_LANDSCAPE";

    /// All known formats
    pub const ALL: &'static [KnownLayoutFormat] = &[
        KnownLayoutFormat::new("A5_PORTRAIT", "A5 Portrait"),
        KnownLayoutFormat::new("A5_LANDSCAPE", "A5 Paysage"),
        KnownLayoutFormat::new("A4_PORTRAIT", "A4 Portrait"),
        KnownLayoutFormat::new("A4_LANDSCAPE", "A4 Paysage"),
        KnownLayoutFormat::new("A3_PORTRAIT", "A3 Portrait"),
        KnownLayoutFormat::new("A3_LANDSCAPE", "A3 Paysage"),
        KnownLayoutFormat::new("A2_PORTRAIT", "A2 Portrait"),
        KnownLayoutFormat::new("A2_LANDSCAPE", "A2 Paysage"),
        KnownLayoutFormat::new("A1_PORTRAIT", "A1 Portrait"),
        KnownLayoutFormat::new("A1_LANDSCAPE", "A1 Paysage"),
        KnownLayoutFormat::new("A0_PORTRAIT", "A0 Portrait"),
        KnownLayoutFormat::new("A0_LANDSCAPE", "A0 Paysage"),
    ];

    /// Look up a format by its legacy name
    ///
    /// Matching ignores surrounding whitespace and case, legacy names were
    /// typed by hand in some older releases.
    #[must_use]
    pub fn by_legacy_name(name: &str) -> Option<&'static KnownLayoutFormat> {
        let name = name.trim();
        Self::ALL
            .iter()
            .find(|f| f.legacy_name.eq_ignore_ascii_case(name))
    }

    /// Look up a format by stable id
    #[must_use]
    pub fn by_id(id: &str) -> Option<&'static KnownLayoutFormat> {
        Self::ALL.iter().find(|f| f.id == id)
    }
}
