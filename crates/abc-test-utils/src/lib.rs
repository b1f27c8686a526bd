//! Testing utilities for the Abc migration workspace
//!
//! Legacy fixtures, collaborator stubs and instrumented steps.

#![allow(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use abc_migration::{
    version_below, Encryptor, MigrationError, MigrationStep, PasswordPrompt, PromptResult,
    Result, ENCRYPTED_PREFIX,
};
use abc_project::{FileSet, ProjectFile, ProjectManifest, ProjectSet};
use parking_lot::Mutex;

/// Manifest saved by a 0.1 release
pub const PROJECT_V010: &str = include_str!("../fixtures/project-0.1.json");

/// Password used by tests that run the full chain
pub const TEST_PASSWORD: &str = "azerty1234";

pub fn legacy_v010_manifest() -> ProjectManifest {
    ProjectManifest::from_json(PROJECT_V010).unwrap()
}

/// 0.1 fixture with one attached image
pub fn legacy_v010_project() -> ProjectSet {
    let mut files = FileSet::new();
    files.insert(ProjectFile::new(
        "images/logo.png",
        vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a],
    ));
    ProjectSet::new(legacy_v010_manifest(), files)
}

pub fn project_at(version: &str) -> ProjectSet {
    ProjectSet::from_manifest(ProjectManifest::new(version))
}

/// Install a test subscriber honoring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Prompt answering every call the same way
#[derive(Debug)]
pub struct StubPrompt {
    answer: PromptResult,
    calls: AtomicUsize,
}

impl StubPrompt {
    pub fn confirming(password: &str) -> Self {
        Self {
            answer: PromptResult::confirmed(password),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            answer: PromptResult::cancelled(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PasswordPrompt for StubPrompt {
    async fn prompt_password(&self, _title: &str, _message: &str) -> Result<PromptResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}

/// Deterministic reversible cipher: xor with the password, hex encoded
///
/// Not secure. Only stands in for the application cipher.
#[derive(Debug, Default)]
pub struct FakeEncryptor {
    calls: AtomicUsize,
}

impl FakeEncryptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn decrypt(ciphertext: &str, password: &str) -> Option<String> {
        let encoded = ciphertext.strip_prefix(ENCRYPTED_PREFIX)?;
        let bytes = hex::decode(encoded).ok()?;
        String::from_utf8(xor(&bytes, password.as_bytes())).ok()
    }
}

fn xor(data: &[u8], key: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(key.iter().cycle())
        .map(|(d, k)| d ^ k)
        .collect()
}

#[async_trait::async_trait]
impl Encryptor for FakeEncryptor {
    async fn encrypt(&self, plaintext: &str, password: &str) -> Result<String> {
        if password.is_empty() {
            return Err(MigrationError::Encryption("empty key".into()));
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        let encoded = hex::encode(xor(plaintext.as_bytes(), password.as_bytes()));
        Ok(format!("{ENCRYPTED_PREFIX}{encoded}"))
    }
}

/// Shared log of step invocations, `name@version` per entry
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Step bumping the version and recording the version it received
#[derive(Debug)]
pub struct RecordingStep {
    name: &'static str,
    target: &'static str,
    log: CallLog,
}

impl RecordingStep {
    pub fn new(name: &'static str, target: &'static str, log: CallLog) -> Self {
        Self { name, target, log }
    }

    pub fn shared(
        name: &'static str,
        target: &'static str,
        log: &CallLog,
    ) -> Arc<dyn MigrationStep> {
        Arc::new(Self::new(name, target, Arc::clone(log)))
    }
}

#[async_trait::async_trait]
impl MigrationStep for RecordingStep {
    fn name(&self) -> &'static str {
        self.name
    }

    fn target_version(&self) -> &'static str {
        self.target
    }

    async fn interested_by(&self, project: &ProjectSet) -> Result<bool> {
        version_below(project, self.target)
    }

    async fn migrate(&self, mut project: ProjectSet) -> Result<ProjectSet> {
        self.log
            .lock()
            .push(format!("{}@{}", self.name, project.version()));
        project.manifest.metadata.version = self.target.to_string();
        Ok(project)
    }
}

/// Where a [`FailingStep`] fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Predicate,
    Migration,
}

/// Step always failing at a given point
#[derive(Debug)]
pub struct FailingStep {
    name: &'static str,
    target: &'static str,
    at: FailAt,
}

impl FailingStep {
    pub fn shared(name: &'static str, target: &'static str, at: FailAt) -> Arc<dyn MigrationStep> {
        Arc::new(Self { name, target, at })
    }
}

#[async_trait::async_trait]
impl MigrationStep for FailingStep {
    fn name(&self) -> &'static str {
        self.name
    }

    fn target_version(&self) -> &'static str {
        self.target
    }

    async fn interested_by(&self, project: &ProjectSet) -> Result<bool> {
        if self.at == FailAt::Predicate {
            return Err(MigrationError::step(self.name, "predicate exploded"));
        }
        version_below(project, self.target)
    }

    async fn migrate(&self, _project: ProjectSet) -> Result<ProjectSet> {
        Err(MigrationError::step(self.name, "migration exploded"))
    }
}
