//! Task store: mutations and document round trip.
//!
//! # Responsibility
//! - Provide the mutation surface the board panel calls: add, move,
//!   archive, unarchive, delete, save.
//! - Persist the whole store after every membership/order change and signal
//!   listeners so the presentation layer redraws.
//!
//! # Invariants
//! - Mutations land in memory first; a failed save never rolls them back.
//! - Soft not-found: absent ids and out-of-range indices are no-ops.
//! - Listener callbacks fire after every successful in-memory mutation,
//!   including ones whose follow-up save failed.

use crate::board::data::ProjectData;
use crate::host::{DocumentIoError, DocumentStore, Notifier};
use crate::model::task::{generate_task_id, Task, TaskId, TaskValidationError};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Change signal delivered to subscribed listeners after each mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    TaskAdded { id: TaskId },
    TasksReordered { from: usize, to: usize },
    TaskArchived { id: TaskId },
    TaskUnarchived { id: TaskId },
    TaskDeleted { id: TaskId },
}

/// In-memory task store bound to one backing document.
///
/// Single-threaded: the host dispatches one gesture at a time and each
/// mutation runs to completion, save included, before the next.
pub struct TaskStore<D: DocumentStore, N: Notifier> {
    documents: D,
    notifier: N,
    reference: String,
    data: ProjectData,
    listeners: Vec<Box<dyn FnMut(&StoreEvent)>>,
}

impl<D: DocumentStore, N: Notifier> TaskStore<D, N> {
    /// Associates a backing document and loads its content.
    ///
    /// Unreadable documents are the one hard failure in this component: the
    /// user is notified and the error is returned so the caller can decide
    /// whether to continue with [`TaskStore::empty`]. Content that reads but
    /// does not parse as a project document opens as an empty project.
    pub fn open(
        documents: D,
        notifier: N,
        reference: impl Into<String>,
    ) -> Result<Self, AssociationError> {
        let reference = reference.into();
        match documents.read(&reference) {
            Ok(text) => {
                let data = ProjectData::decode(&text);
                info!(
                    "event=board_open module=board status=ok reference={reference} tasks={} archived={}",
                    data.tasks.len(),
                    data.archived.len()
                );
                Ok(Self {
                    documents,
                    notifier,
                    reference,
                    data,
                    listeners: Vec::new(),
                })
            }
            Err(source) => {
                error!("event=board_open module=board status=error reference={reference} error={source}");
                notifier.notify(&format!("Failed to open project document: {reference}"));
                Err(AssociationError { reference, source })
            }
        }
    }

    /// Creates a store for a document that has no readable content yet.
    pub fn empty(documents: D, notifier: N, reference: impl Into<String>) -> Self {
        Self {
            documents,
            notifier,
            reference: reference.into(),
            data: ProjectData::default(),
            listeners: Vec::new(),
        }
    }

    /// Backing document reference this store is associated with.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Active tasks in user-controlled order.
    pub fn tasks(&self) -> &[Task] {
        &self.data.tasks
    }

    /// Archived tasks in insertion order.
    pub fn archived(&self) -> &[Task] {
        &self.data.archived
    }

    /// Registers a listener fired after every successful mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Appends a new task to the active sequence and persists.
    ///
    /// # Errors
    /// Returns the validation error unchanged when `title` or `file_path`
    /// is blank; the store is not touched in that case.
    pub fn add(&mut self, title: &str, file_path: &str) -> Result<Task, TaskValidationError> {
        let mut id = generate_task_id();
        // A loaded document may already carry an id shaped like a generated
        // one; the sequence suffix makes the retry loop terminate.
        while self.data.contains_id(&id) {
            id = generate_task_id();
        }
        let task = Task::with_id(id, title, file_path)?;
        self.data.tasks.push(task.clone());
        info!(
            "event=board_add module=board status=ok tasks={}",
            self.data.tasks.len()
        );
        self.save();
        self.emit(StoreEvent::TaskAdded {
            id: task.id.clone(),
        });
        Ok(task)
    }

    /// Relocates the active task at `from` to position `to`.
    ///
    /// No-op when `from == to` (nothing changed, nothing persisted) and when
    /// either index is out of range, so a stale drag gesture cannot fault
    /// the session.
    pub fn move_task(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        let len = self.data.tasks.len();
        if from >= len || to >= len {
            debug!(
                "event=board_move module=board status=skip reason=out_of_range from={from} to={to} len={len}"
            );
            return;
        }
        let task = self.data.tasks.remove(from);
        self.data.tasks.insert(to, task);
        self.save();
        self.emit(StoreEvent::TasksReordered { from, to });
    }

    /// Moves an active task to the end of the archive.
    ///
    /// Soft no-op when `id` is not in the active sequence.
    pub fn archive(&mut self, id: &str) {
        let Some(index) = self.data.tasks.iter().position(|task| task.id == id) else {
            debug!("event=board_archive module=board status=skip reason=not_found");
            return;
        };
        let task = self.data.tasks.remove(index);
        let id = task.id.clone();
        self.data.archived.push(task);
        self.save();
        self.emit(StoreEvent::TaskArchived { id });
    }

    /// Moves an archived task back to the end of the active sequence.
    ///
    /// Soft no-op when `id` is not in the archive.
    pub fn unarchive(&mut self, id: &str) {
        let Some(index) = self.data.archived.iter().position(|task| task.id == id) else {
            debug!("event=board_unarchive module=board status=skip reason=not_found");
            return;
        };
        let task = self.data.archived.remove(index);
        let id = task.id.clone();
        self.data.tasks.push(task);
        self.save();
        self.emit(StoreEvent::TaskUnarchived { id });
    }

    /// Permanently removes a task from the indicated sequence.
    ///
    /// Only the indicated sequence is searched; an id present in the other
    /// sequence is left untouched. Soft no-op when absent.
    pub fn delete(&mut self, id: &str, from_archive: bool) {
        let sequence = if from_archive {
            &mut self.data.archived
        } else {
            &mut self.data.tasks
        };
        let Some(index) = sequence.iter().position(|task| task.id == id) else {
            debug!("event=board_delete module=board status=skip reason=not_found from_archive={from_archive}");
            return;
        };
        let task = sequence.remove(index);
        self.save();
        self.emit(StoreEvent::TaskDeleted { id: task.id });
    }

    /// Serializes the full store over the backing document.
    ///
    /// A failed write is notified and logged; in-memory state is retained so
    /// the next mutation (or an explicit `save`) retries the write.
    pub fn save(&self) {
        let text = match self.data.encode() {
            Ok(text) => text,
            Err(err) => {
                error!("event=board_save module=board status=error reason=encode error={err}");
                self.notifier
                    .notify("Failed to save project document; changes are kept in memory.");
                return;
            }
        };
        match self.documents.write(&self.reference, &text) {
            Ok(()) => info!(
                "event=board_save module=board status=ok reference={} tasks={} archived={}",
                self.reference,
                self.data.tasks.len(),
                self.data.archived.len()
            ),
            Err(err) => {
                error!(
                    "event=board_save module=board status=error reference={} error={err}",
                    self.reference
                );
                self.notifier
                    .notify("Failed to save project document; changes are kept in memory.");
            }
        }
    }

    fn emit(&mut self, event: StoreEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

/// Failure to associate and read a backing document.
#[derive(Debug)]
pub struct AssociationError {
    pub reference: String,
    pub source: DocumentIoError,
}

impl Display for AssociationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to associate project document {}: {}",
            self.reference, self.source
        )
    }
}

impl Error for AssociationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
