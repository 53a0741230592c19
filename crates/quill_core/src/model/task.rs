//! Task domain model.
//!
//! # Responsibility
//! - Define the task record persisted in the project document.
//! - Validate creation input and generate stable identifiers.
//!
//! # Invariants
//! - `id` is opaque, unique within a session, and never reused.
//! - `title` and `file_path` are non-empty at creation time.
//! - `file_path` is a reference only; existence is not checked here.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Stable opaque identifier for one task.
///
/// Kept as a type alias: the id is treated as an uninterpreted string
/// everywhere, including documents written by other implementations.
pub type TaskId = String;

/// One unit of work linked to a note document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Assigned at creation, never recomputed.
    pub id: TaskId,
    /// User-visible display title.
    pub title: String,
    /// Path of the associated note. Serialized as `filePath` to match the
    /// document schema.
    #[serde(rename = "filePath")]
    pub file_path: String,
}

impl Task {
    /// Creates a task with a freshly generated identifier.
    ///
    /// # Errors
    /// - [`TaskValidationError::EmptyTitle`] when `title` is blank.
    /// - [`TaskValidationError::EmptyFilePath`] when `file_path` is blank.
    pub fn new(
        title: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(generate_task_id(), title, file_path)
    }

    /// Creates a task with a caller-provided identifier.
    ///
    /// Used where identity already exists, e.g. collision-avoidance retries
    /// in the board.
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        if id.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        let file_path = file_path.into();
        if file_path.trim().is_empty() {
            return Err(TaskValidationError::EmptyFilePath);
        }
        Ok(Self {
            id,
            title,
            file_path,
        })
    }
}

/// Generates a new opaque task identifier.
///
/// Current epoch milliseconds plus a process-local sequence suffix:
/// monotonically distinguishing, collision free within one session even for
/// tasks created in the same millisecond.
pub fn generate_task_id() -> TaskId {
    static SEQUENCE: AtomicU64 = AtomicU64::new(0);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0);
    let suffix = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{millis}-{suffix:04}")
}

/// Creation-input validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
    EmptyTitle,
    EmptyFilePath,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::EmptyFilePath => write!(f, "task file path must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}
