//! Migration configuration

use abc_project::LayoutFormats;
use serde::{Deserialize, Serialize};

use crate::error::{MigrationError, Result};

/// Migration chain configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MigrationConfig {
    /// Whether interactive steps may run
    pub interaction: InteractionPolicy,
    /// Layout format id used for unrecognized legacy format names
    pub fallback_layout_format: String,
    /// Text shown by the password prompt
    pub password_prompt: PromptText,
}

impl MigrationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for batch contexts without a user
    #[inline]
    #[must_use]
    pub fn non_interactive() -> Self {
        Self::default().with_interaction(InteractionPolicy::Forbidden)
    }

    /// With interaction policy
    #[inline]
    #[must_use]
    pub fn with_interaction(mut self, interaction: InteractionPolicy) -> Self {
        self.interaction = interaction;
        self
    }

    /// With fallback layout format id
    #[inline]
    #[must_use]
    pub fn with_fallback_layout_format(mut self, id: impl Into<String>) -> Self {
        self.fallback_layout_format = id.into();
        self
    }

    /// With password prompt text
    #[inline]
    #[must_use]
    pub fn with_password_prompt(mut self, text: PromptText) -> Self {
        self.password_prompt = text;
        self
    }

    /// Parse from JSON and validate
    ///
    /// # Errors
    /// Returns [`MigrationError::Config`] on invalid JSON or invalid values
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MigrationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from YAML and validate
    ///
    /// # Errors
    /// Returns [`MigrationError::Config`] on invalid YAML or invalid values
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| MigrationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values
    ///
    /// # Errors
    /// Returns [`MigrationError::Config`] if the fallback layout format is unknown
    pub fn validate(&self) -> Result<()> {
        if LayoutFormats::by_id(&self.fallback_layout_format).is_none() {
            return Err(MigrationError::Config(format!(
                "unknown fallback layout format: {}",
                self.fallback_layout_format
            )));
        }
        Ok(())
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            interaction: InteractionPolicy::Allowed,
            fallback_layout_format: LayoutFormats::A4_LANDSCAPE.to_string(),
            password_prompt: PromptText::default(),
        }
    }
}

/// Whether steps may ask the user for input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionPolicy {
    /// Interactive steps run and may prompt
    #[default]
    Allowed,
    /// Interactive steps that are needed abort the update
    Forbidden,
}

impl InteractionPolicy {
    /// Check if prompting is allowed
    #[inline]
    #[must_use]
    pub fn allows_interaction(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Prompt title and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptText {
    pub title: String,
    pub message: String,
}

impl Default for PromptText {
    fn default() -> Self {
        Self {
            title: "Project password".to_string(),
            message: "This project contains credentials. Enter a password to protect them."
                .to_string(),
        }
    }
}
