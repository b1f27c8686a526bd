//! Project file set
//!
//! Binary attachments travelling with a manifest. Migrations treat them as
//! opaque blobs.

use std::fmt;

use crate::manifest::ProjectManifest;

/// Single attached file
#[derive(Clone, PartialEq, Eq)]
pub struct ProjectFile {
    /// Path inside the project archive
    pub path: String,
    /// Raw content
    pub content: Vec<u8>,
}

impl ProjectFile {
    /// Create file
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

impl fmt::Debug for ProjectFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectFile")
            .field("path", &self.path)
            .field("len", &self.content.len())
            .finish()
    }
}

/// Unordered collection of attached files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    files: Vec<ProjectFile>,
}

impl FileSet {
    /// Create empty file set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any file with the same path
    pub fn insert(&mut self, file: ProjectFile) {
        match self.files.iter_mut().find(|f| f.path == file.path) {
            Some(existing) => *existing = file,
            None => self.files.push(file),
        }
    }

    /// Get file by path
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ProjectFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Check if a path is present
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Number of files
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over files
    pub fn iter(&self) -> impl Iterator<Item = &ProjectFile> {
        self.files.iter()
    }
}

impl FromIterator<ProjectFile> for FileSet {
    fn from_iter<I: IntoIterator<Item = ProjectFile>>(iter: I) -> Self {
        let mut set = Self::new();
        for file in iter {
            set.insert(file);
        }
        set
    }
}

impl IntoIterator for FileSet {
    type Item = ProjectFile;
    type IntoIter = std::vec::IntoIter<ProjectFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

/// Manifest plus attached files, the unit a migration operates on
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSet {
    pub manifest: ProjectManifest,
    pub files: FileSet,
}

impl ProjectSet {
    /// Bundle a manifest with its files
    #[inline]
    #[must_use]
    pub fn new(manifest: ProjectManifest, files: FileSet) -> Self {
        Self { manifest, files }
    }

    /// Manifest without attachments
    #[inline]
    #[must_use]
    pub fn from_manifest(manifest: ProjectManifest) -> Self {
        Self::new(manifest, FileSet::new())
    }

    /// Raw manifest version
    #[inline]
    #[must_use]
    pub fn version(&self) -> &str {
        self.manifest.version()
    }

    /// Split into manifest and files
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (ProjectManifest, FileSet) {
        (self.manifest, self.files)
    }
}
