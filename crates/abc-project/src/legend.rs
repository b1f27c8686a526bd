//! Legends
//!
//! Up to 0.6 a project owned one global legend. From 0.7 on every layout
//! and every shared view embeds its own copy.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Legend definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendManifest {
    pub id: String,

    #[serde(default)]
    pub display: LegendDisplay,

    #[serde(default)]
    pub items: Vec<LegendItem>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LegendManifest {
    /// Empty hidden legend with a fresh id
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            display: LegendDisplay::Hidden,
            items: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Deep copy with a new legend id and new item ids
    ///
    /// Item content (text, symbol, payload) is copied unchanged.
    #[must_use]
    pub fn with_fresh_ids(&self) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            display: self.display,
            items: self
                .items
                .iter()
                .map(|item| LegendItem {
                    id: Uuid::new_v4().to_string(),
                    ..item.clone()
                })
                .collect(),
            extra: self.extra.clone(),
        }
    }
}

/// Legend position on the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendDisplay {
    #[default]
    Hidden,
    UpperLeftCorner,
    UpperRightCorner,
    BottomRightCorner,
    BottomLeftCorner,
}

/// Legend entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub id: String,

    #[serde(default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LegendItem {
    /// Text-only item with a fresh id
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            symbol: None,
            extra: Map::new(),
        }
    }
}
