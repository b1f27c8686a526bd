//! Error types for the project model

/// Project model error
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Version string could not be read as semver, even leniently
    #[error("invalid version '{version}': {reason}")]
    InvalidVersion {
        /// Raw version string as found in the manifest
        version: String,
        /// Parser diagnostic
        reason: String,
    },

    /// Manifest could not be (de)serialized
    #[error("manifest serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProjectError {
    /// Create invalid version error
    #[inline]
    #[must_use]
    pub fn invalid_version(version: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias for project model operations
pub type Result<T> = std::result::Result<T, ProjectError>;
