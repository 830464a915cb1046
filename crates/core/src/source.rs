//! Source provider abstraction for filesystem-independent loading.
//!
//! The [`SourceProvider`] trait abstracts file I/O so specs can be parsed
//! from memory in tests and from disk in the CLI.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Trait that abstracts reading spec text.
pub trait SourceProvider {
    /// Whether `path` names a readable source.
    fn exists(&self, path: &Path) -> bool;

    /// Read the source text for a given path.
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error>;
}

/// Default filesystem-backed source provider.
///
/// Invalid UTF-8 is replaced rather than rejected, so a stray byte in a
/// spec never stops validation.
pub struct FileSystemProvider;

impl SourceProvider for FileSystemProvider {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// In-memory source provider for testing.
///
/// Maps paths to source text. Lookups normalize `.` and `..` without
/// touching the filesystem.
#[derive(Default)]
pub struct InMemoryProvider {
    files: HashMap<PathBuf, String>,
}

impl InMemoryProvider {
    pub fn new(files: HashMap<PathBuf, String>) -> Self {
        let files = files
            .into_iter()
            .map(|(path, text)| (Self::normalize_path(&path), text))
            .collect();
        Self { files }
    }

    /// Add one file, replacing any previous content at that path.
    pub fn with_file(mut self, path: impl AsRef<Path>, text: impl Into<String>) -> Self {
        self.files
            .insert(Self::normalize_path(path.as_ref()), text.into());
        self
    }

    fn normalize_path(path: &Path) -> PathBuf {
        let mut components = Vec::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    components.pop();
                }
                other => components.push(other),
            }
        }
        components.iter().collect()
    }
}

impl SourceProvider for InMemoryProvider {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(&Self::normalize_path(path))
    }

    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        let normalized = Self::normalize_path(path);
        self.files.get(&normalized).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file not found in memory: {}", normalized.display()),
            )
        })
    }
}
