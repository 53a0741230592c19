//! Host collaborator contracts.
//!
//! # Responsibility
//! - Define the narrow interfaces the core consumes from the hosting
//!   application: document read/write/resolve and user notification.
//! - Provide concrete implementations for filesystem-backed hosts.
//!
//! # Invariants
//! - `write` replaces the previous content fully or fails; no partial
//!   content is ever observable through these contracts.
//! - Notifications are fire-and-forget; delivery is never awaited.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod fs;

pub use fs::FsDocumentStore;

/// Persistence primitives for host documents.
///
/// References are opaque host paths; the core never interprets them beyond
/// passing them back to the same store.
pub trait DocumentStore {
    /// Reads the full textual content of one document.
    fn read(&self, reference: &str) -> Result<String, DocumentIoError>;

    /// Replaces the full content of one document, creating it if needed.
    fn write(&self, reference: &str, content: &str) -> Result<(), DocumentIoError>;

    /// Resolves a task reference path to a readable document reference.
    ///
    /// Returns `None` when no such document exists. Used when the user
    /// activates a task, never by store mutations.
    fn resolve(&self, path: &str) -> Option<String>;
}

/// Fire-and-forget user-visible feedback channel.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Notifier that records feedback in the application log.
///
/// Default collaborator for headless hosts (CLI, tests without a UI).
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        log::info!("event=notify module=host message={message}");
    }
}

/// Document persistence errors.
#[derive(Debug)]
pub enum DocumentIoError {
    /// The referenced document does not exist.
    NotFound { reference: String },
    /// Read or write failed below the reference layer.
    Io {
        reference: String,
        source: std::io::Error,
    },
}

impl Display for DocumentIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { reference } => write!(f, "document not found: {reference}"),
            Self::Io { reference, source } => {
                write!(f, "document io failed for {reference}: {source}")
            }
        }
    }
}

impl Error for DocumentIoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}
