//! Abc Project Model
//!
//! Versioned project manifests and their attached files.
//!
//! # Core Concepts
//!
//! - [`ProjectManifest`]: Versioned document (metadata, layers, layouts, views)
//! - [`LayerManifest`]: Tagged union of layer variants
//! - [`FileSet`]: Opaque binary attachments
//! - [`ProjectSet`]: Manifest plus files, the unit migrations operate on
//! - [`version`]: Lenient semver comparison of manifest versions
//!
//! # Example
//!
//! ```rust,ignore
//! use abc_project::{ProjectManifest, ProjectSet, version};
//!
//! let manifest = ProjectManifest::from_json(&raw)?;
//! if version::less_than(manifest.version(), "0.7.0")? {
//!     // needs migration
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod error;
mod files;
mod layer;
mod layout;
mod legend;
mod manifest;
mod view;

pub mod version;

// Re-exports
pub use error::{ProjectError, Result};
pub use files::{FileSet, ProjectFile, ProjectSet};
pub use layer::{
    BasicAuth, LayerBody, LayerKind, LayerManifest, PredefinedMetadata, VectorMetadata,
    WmsMetadata, WmtsMetadata, XyzMetadata,
};
pub use layout::{KnownLayoutFormat, LayoutFormat, LayoutFormats, LayoutManifest};
pub use legend::{LegendDisplay, LegendItem, LegendManifest};
pub use manifest::{ProjectManifest, ProjectMetadata};
pub use view::{MapView, ProjectionRef, SharedView, DEFAULT_PROJECTION};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
