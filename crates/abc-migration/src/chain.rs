//! Production migration chain
//!
//! Registers every known step in chronological order. Adding a schema
//! version means appending one step here.

use std::sync::Arc;

use crate::collaborators::{Encryptor, PasswordPrompt};
use crate::config::MigrationConfig;
use crate::error::Result;
use crate::step::MigrationStep;
use crate::steps::{
    AddDefaultView, AddSharingFields, EncryptWmsUrls, LayoutFormatIds, LegendPerLayout,
    MultiUrlWms,
};
use crate::updater::ProjectUpdater;

/// Version written by the last registered step
pub const CURRENT_VERSION: &str = "0.7.0";

/// All production steps, oldest transition first
#[must_use]
pub fn default_chain(
    prompt: Arc<dyn PasswordPrompt>,
    encryptor: Arc<dyn Encryptor>,
    config: &MigrationConfig,
) -> Vec<Arc<dyn MigrationStep>> {
    vec![
        Arc::new(AddDefaultView::new()),
        Arc::new(
            EncryptWmsUrls::new(prompt, encryptor)
                .with_prompt_text(config.password_prompt.clone()),
        ),
        Arc::new(MultiUrlWms::new()),
        Arc::new(LayoutFormatIds::with_fallback(
            config.fallback_layout_format.clone(),
        )),
        Arc::new(AddSharingFields::new()),
        Arc::new(LegendPerLayout::new()),
    ]
}

/// Updater running the production chain
///
/// # Errors
/// Returns [`crate::MigrationError::Config`] if the configuration is invalid
pub fn default_updater(
    prompt: Arc<dyn PasswordPrompt>,
    encryptor: Arc<dyn Encryptor>,
    config: MigrationConfig,
) -> Result<ProjectUpdater> {
    config.validate()?;
    let steps = default_chain(prompt, encryptor, &config);
    Ok(ProjectUpdater::try_new(steps)?.with_config(config))
}
