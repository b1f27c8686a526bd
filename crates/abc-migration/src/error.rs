//! Error types for the migration chain
//!
//! Provides error handling for:
//! - Malformed manifests met by a step
//! - User cancellation of interactive steps
//! - Collaborator failures (encryption, prompt)
//! - Chain invariant violations (ordering, version monotonicity)

use abc_project::ProjectError;

/// Main migration error type
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Manifest model error (malformed version, serialization)
    #[error("project error: {0}")]
    Project(#[from] ProjectError),

    /// Password prompt was cancelled or answered with an empty value
    #[error("Password is mandatory")]
    PasswordMandatory,

    /// Encryption collaborator failed
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Prompt collaborator failed
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// An interactive step is needed but interaction is disabled
    #[error("step '{step}' requires user interaction")]
    InteractionRequired {
        /// Step name
        step: &'static str,
    },

    /// Step returned a manifest whose version did not move to its target
    #[error("step '{step}' did not advance version: {before} -> {after}")]
    VersionNotAdvanced {
        /// Step name
        step: &'static str,
        /// Version before the step
        before: String,
        /// Version after the step
        after: String,
    },

    /// Steps are not registered oldest transition first
    #[error("step '{next}' ({next_version}) follows '{previous}' ({previous_version})")]
    ChainOutOfOrder {
        /// Earlier registered step
        previous: &'static str,
        /// Its target version
        previous_version: String,
        /// Later registered step
        next: &'static str,
        /// Its target version
        next_version: String,
    },

    /// Step met data it cannot handle
    #[error("step '{step}' failed: {message}")]
    Step {
        /// Step name
        step: &'static str,
        /// Failure description
        message: String,
    },

    /// Invalid migration configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl MigrationError {
    /// Create step failure
    #[inline]
    pub fn step(step: &'static str, message: impl Into<String>) -> Self {
        Self::Step {
            step,
            message: message.into(),
        }
    }

    /// Name of the step the error is attributed to, if any
    #[must_use]
    pub fn step_name(&self) -> Option<&'static str> {
        match self {
            Self::Step { step, .. }
            | Self::InteractionRequired { step }
            | Self::VersionNotAdvanced { step, .. } => Some(*step),
            Self::ChainOutOfOrder { next, .. } => Some(*next),
            Self::Project(_)
            | Self::PasswordMandatory
            | Self::Encryption(_)
            | Self::Prompt(_)
            | Self::Config(_) => None,
        }
    }

    /// Check if the user declined to provide required input
    #[inline]
    #[must_use]
    pub fn is_user_cancellation(&self) -> bool {
        matches!(self, Self::PasswordMandatory)
    }

    /// Check if error is retryable
    ///
    /// Migrations are deterministic: the same input fails the same way.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Message suitable for display to the user
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PasswordMandatory => {
                "A password is required to protect the credentials stored in this project."
            }
            Self::InteractionRequired { .. } => {
                "This project must be opened interactively to be upgraded."
            }
            Self::Project(_)
            | Self::Encryption(_)
            | Self::Prompt(_)
            | Self::VersionNotAdvanced { .. }
            | Self::ChainOutOfOrder { .. }
            | Self::Step { .. }
            | Self::Config(_) => "This project could not be opened.",
        }
    }
}

/// Result alias for migration operations
pub type Result<T> = std::result::Result<T, MigrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_mandatory_message_is_exact() {
        assert_eq!(
            MigrationError::PasswordMandatory.to_string(),
            "Password is mandatory"
        );
    }

    #[test]
    fn user_cancellation_is_distinguishable() {
        assert!(MigrationError::PasswordMandatory.is_user_cancellation());
        assert!(!MigrationError::Encryption("boom".into()).is_user_cancellation());
        assert!(!MigrationError::step("x", "missing field").is_user_cancellation());
    }

    #[test]
    fn step_attribution() {
        assert_eq!(MigrationError::step("x", "boom").step_name(), Some("x"));
        assert_eq!(
            MigrationError::InteractionRequired { step: "y" }.step_name(),
            Some("y")
        );
        assert_eq!(MigrationError::PasswordMandatory.step_name(), None);
    }

    #[test]
    fn nothing_is_retryable() {
        assert!(!MigrationError::Prompt("closed".into()).is_retryable());
        assert!(!MigrationError::PasswordMandatory.is_retryable());
    }

    #[test]
    fn user_messages() {
        assert!(MigrationError::PasswordMandatory
            .user_message()
            .contains("password"));
        assert!(MigrationError::Config("bad".into())
            .user_message()
            .contains("could not be opened"));
    }

    #[test]
    fn project_error_converts() {
        let err: MigrationError = ProjectError::invalid_version("x", "bad").into();
        assert!(err.to_string().contains("invalid version 'x'"));
    }
}
