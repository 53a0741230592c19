//! Filesystem-backed document store.
//!
//! # Responsibility
//! - Map document references to files under one root directory (the vault).
//! - Keep io::Error details attached to the failing reference.
//!
//! # Invariants
//! - References are resolved relative to the root; the store never writes
//!   outside of it on well-formed references.

use super::{DocumentIoError, DocumentStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Document store rooted at one vault directory.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, reference: &str) -> PathBuf {
        self.root.join(reference)
    }
}

impl DocumentStore for FsDocumentStore {
    fn read(&self, reference: &str) -> Result<String, DocumentIoError> {
        fs::read_to_string(self.full_path(reference)).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                DocumentIoError::NotFound {
                    reference: reference.to_string(),
                }
            } else {
                DocumentIoError::Io {
                    reference: reference.to_string(),
                    source,
                }
            }
        })
    }

    fn write(&self, reference: &str, content: &str) -> Result<(), DocumentIoError> {
        let path = self.full_path(reference);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| DocumentIoError::Io {
                reference: reference.to_string(),
                source,
            })?;
        }
        fs::write(&path, content).map_err(|source| DocumentIoError::Io {
            reference: reference.to_string(),
            source,
        })
    }

    fn resolve(&self, path: &str) -> Option<String> {
        self.full_path(path)
            .is_file()
            .then(|| path.to_string())
    }
}
