//! 0.2 -> 0.3: credentials embedded in WMS layers are encrypted
//!
//! WMS urls often carry tokens and basic auth passwords. From 0.3 on they
//! are stored encrypted with a password chosen by the user.
//!
//! Some projects were saved with encrypted values but a stale version, so
//! every value is checked for the `encrypted:` marker and encrypted only once.

use std::sync::Arc;

use abc_project::{LayerManifest, ProjectManifest, ProjectSet, WmsMetadata};

use crate::collaborators::{is_encrypted, Encryptor, PasswordPrompt, ENCRYPTED_PREFIX};
use crate::config::PromptText;
use crate::error::{MigrationError, Result};
use crate::step::{version_below, MigrationStep, StepCapability};

const NEXT: &str = "0.3.0";

/// Encrypt WMS urls and credentials with a user supplied password
pub struct EncryptWmsUrls {
    prompt: Arc<dyn PasswordPrompt>,
    encryptor: Arc<dyn Encryptor>,
    prompt_text: PromptText,
}

impl EncryptWmsUrls {
    /// Create step with default prompt text
    #[must_use]
    pub fn new(prompt: Arc<dyn PasswordPrompt>, encryptor: Arc<dyn Encryptor>) -> Self {
        Self {
            prompt,
            encryptor,
            prompt_text: PromptText::default(),
        }
    }

    /// With prompt text
    #[inline]
    #[must_use]
    pub fn with_prompt_text(mut self, text: PromptText) -> Self {
        self.prompt_text = text;
        self
    }

    /// Check if any WMS layer still holds a plaintext secret
    fn needs_encryption(manifest: &ProjectManifest) -> bool {
        manifest.layers.iter().any(|layer| match layer {
            LayerManifest::Wms(wms) => has_plaintext(&wms.metadata),
            LayerManifest::Predefined(_)
            | LayerManifest::Vector(_)
            | LayerManifest::Wmts(_)
            | LayerManifest::Xyz(_) => false,
        })
    }

    async fn ask_password(&self) -> Result<String> {
        let answer = self
            .prompt
            .prompt_password(&self.prompt_text.title, &self.prompt_text.message)
            .await?;

        match answer.accepted_value() {
            Some(password) => Ok(password.to_string()),
            None => Err(MigrationError::PasswordMandatory),
        }
    }

    async fn encrypt_value(&self, value: &mut String, password: &str) -> Result<()> {
        if is_encrypted(value) {
            return Ok(());
        }

        let ciphertext = self.encryptor.encrypt(value, password).await?;
        if !is_encrypted(&ciphertext) {
            return Err(MigrationError::Encryption(format!(
                "ciphertext is missing the '{ENCRYPTED_PREFIX}' marker"
            )));
        }
        *value = ciphertext;
        Ok(())
    }

    async fn encrypt_wms(&self, metadata: &mut WmsMetadata, password: &str) -> Result<()> {
        if let Some(url) = metadata.remote_url.as_mut() {
            self.encrypt_value(url, password).await?;
        }
        for url in metadata.remote_urls.iter_mut().flatten() {
            self.encrypt_value(url, password).await?;
        }
        if let Some(auth) = metadata.auth.as_mut() {
            self.encrypt_value(&mut auth.password, password).await?;
        }
        Ok(())
    }
}

fn has_plaintext(metadata: &WmsMetadata) -> bool {
    metadata.urls().any(|url| !is_encrypted(url))
        || metadata
            .auth
            .as_ref()
            .is_some_and(|auth| !is_encrypted(&auth.password))
}

fn has_ciphertext(metadata: &WmsMetadata) -> bool {
    metadata.urls().any(is_encrypted)
        || metadata
            .auth
            .as_ref()
            .is_some_and(|auth| is_encrypted(&auth.password))
}

fn holds_credentials(manifest: &ProjectManifest) -> bool {
    manifest.layers.iter().any(|layer| match layer {
        LayerManifest::Wms(wms) => has_ciphertext(&wms.metadata),
        LayerManifest::Predefined(_)
        | LayerManifest::Vector(_)
        | LayerManifest::Wmts(_)
        | LayerManifest::Xyz(_) => false,
    })
}

impl std::fmt::Debug for EncryptWmsUrls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptWmsUrls")
            .field("prompt_text", &self.prompt_text)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl MigrationStep for EncryptWmsUrls {
    fn name(&self) -> &'static str {
        "encrypt-wms-urls"
    }

    fn target_version(&self) -> &'static str {
        NEXT
    }

    fn capability(&self) -> StepCapability {
        StepCapability::Interactive
    }

    async fn interested_by(&self, project: &ProjectSet) -> Result<bool> {
        version_below(project, NEXT)
    }

    async fn needs_interaction(&self, project: &ProjectSet) -> Result<bool> {
        Ok(Self::needs_encryption(&project.manifest))
    }

    async fn migrate(&self, project: ProjectSet) -> Result<ProjectSet> {
        let ProjectSet {
            mut manifest,
            files,
        } = project;

        if Self::needs_encryption(&manifest) {
            let password = self.ask_password().await?;

            for layer in &mut manifest.layers {
                match layer {
                    LayerManifest::Wms(wms) => {
                        self.encrypt_wms(&mut wms.metadata, &password).await?;
                    }
                    LayerManifest::Predefined(_)
                    | LayerManifest::Vector(_)
                    | LayerManifest::Wmts(_)
                    | LayerManifest::Xyz(_) => {}
                }
            }
            tracing::info!("WMS credentials encrypted");
        }

        // Also covers ciphertext saved under a stale version
        if holds_credentials(&manifest) {
            manifest.metadata.contains_credentials = Some(true);
        }

        manifest.metadata.version = NEXT.to_string();
        Ok(ProjectSet::new(manifest, files))
    }
}
