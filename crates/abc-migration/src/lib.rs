//! Abc Project Migration
//!
//! Upgrades project manifests saved by older releases to the current schema.
//!
//! # Core Concepts
//!
//! - [`MigrationStep`]: One version transition (predicate + transformation)
//! - [`ProjectUpdater`]: Runs registered steps in chronological order
//! - [`Encryptor`] / [`PasswordPrompt`]: Collaborators of interactive steps
//! - [`MigrationConfig`]: Interaction policy, fallbacks, prompt text
//! - [`default_updater`]: The production chain up to [`CURRENT_VERSION`]
//!
//! # Example
//!
//! ```rust,ignore
//! use abc_migration::{default_updater, MigrationConfig};
//! use abc_project::{ProjectManifest, ProjectSet};
//!
//! let updater = default_updater(prompt, encryptor, MigrationConfig::default())?;
//! let manifest = ProjectManifest::from_json(&raw)?;
//! let project = updater.update(ProjectSet::new(manifest, files)).await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod chain;
mod collaborators;
mod config;
mod error;
mod step;
mod updater;

pub mod steps;

// Re-exports
pub use chain::{default_chain, default_updater, CURRENT_VERSION};
pub use collaborators::{is_encrypted, Encryptor, PasswordPrompt, PromptResult, ENCRYPTED_PREFIX};
pub use config::{InteractionPolicy, MigrationConfig, PromptText};
pub use error::{MigrationError, Result};
pub use step::{version_below, MigrationStep, StepCapability};
pub use updater::{AppliedStep, ProjectUpdater, UpdateReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
