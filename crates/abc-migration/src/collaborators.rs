//! External collaborators consumed by interactive steps
//!
//! Implementations live in the host application: the encryptor wraps the
//! application's cipher, the prompt wraps a modal dialog.

use crate::error::Result;

/// Prefix marking ciphertext produced by an [`Encryptor`]
pub const ENCRYPTED_PREFIX: &str = "encrypted:";

/// Check if a value already holds ciphertext
#[inline]
#[must_use]
pub fn is_encrypted(value: &str) -> bool {
    value.starts_with(ENCRYPTED_PREFIX)
}

/// Symmetric encryption service
///
/// Returned ciphertext must start with [`ENCRYPTED_PREFIX`].
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Encryptor: Send + Sync {
    /// Encrypt `plaintext` with `password`
    async fn encrypt(&self, plaintext: &str, password: &str) -> Result<String>;
}

/// Password dialog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PasswordPrompt: Send + Sync {
    /// Ask the user for a password
    ///
    /// Resolves once the user confirms or cancels.
    async fn prompt_password(&self, title: &str, message: &str) -> Result<PromptResult>;
}

/// Answer of a [`PasswordPrompt`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptResult {
    /// Whether the user confirmed the dialog
    pub confirmed: bool,
    /// Entered value, meaningful only when confirmed
    pub value: String,
}

impl PromptResult {
    /// Confirmed answer
    #[inline]
    #[must_use]
    pub fn confirmed(value: impl Into<String>) -> Self {
        Self {
            confirmed: true,
            value: value.into(),
        }
    }

    /// Cancelled dialog
    #[inline]
    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            confirmed: false,
            value: String::new(),
        }
    }

    /// Confirmed non-empty value
    #[inline]
    #[must_use]
    pub fn accepted_value(&self) -> Option<&str> {
        (self.confirmed && !self.value.is_empty()).then_some(self.value.as_str())
    }
}
