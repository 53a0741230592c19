use quill_core::{
    DocumentIoError, DocumentStore, Notifier, ProjectData, StoreEvent, TaskStore,
    TaskValidationError,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::collections::HashSet;
use std::rc::Rc;

/// In-memory document store double with switchable write failures.
#[derive(Clone, Default)]
struct MemoryDocumentStore {
    documents: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryDocumentStore {
    fn with_document(reference: &str, content: &str) -> Self {
        let store = Self::default();
        store
            .documents
            .borrow_mut()
            .insert(reference.to_string(), content.to_string());
        store
    }

    fn content(&self, reference: &str) -> Option<String> {
        self.documents.borrow().get(reference).cloned()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn read(&self, reference: &str) -> Result<String, DocumentIoError> {
        self.documents
            .borrow()
            .get(reference)
            .cloned()
            .ok_or_else(|| DocumentIoError::NotFound {
                reference: reference.to_string(),
            })
    }

    fn write(&self, reference: &str, content: &str) -> Result<(), DocumentIoError> {
        if self.fail_writes.get() {
            return Err(DocumentIoError::Io {
                reference: reference.to_string(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.documents
            .borrow_mut()
            .insert(reference.to_string(), content.to_string());
        Ok(())
    }

    fn resolve(&self, path: &str) -> Option<String> {
        self.documents
            .borrow()
            .contains_key(path)
            .then(|| path.to_string())
    }
}

/// Notifier double that records every message.
#[derive(Clone, Default)]
struct RecordingNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

const DOC: &str = "projects/site.md";

fn empty_board() -> (
    TaskStore<MemoryDocumentStore, RecordingNotifier>,
    MemoryDocumentStore,
    RecordingNotifier,
) {
    let documents = MemoryDocumentStore::default();
    let notifier = RecordingNotifier::default();
    let store = TaskStore::empty(documents.clone(), notifier.clone(), DOC);
    (store, documents, notifier)
}

fn persisted_data(documents: &MemoryDocumentStore) -> ProjectData {
    ProjectData::decode(&documents.content(DOC).expect("document should exist"))
}

#[test]
fn add_appends_task_and_persists_whole_store() {
    let (mut store, documents, _) = empty_board();

    let task = store.add("Write intro", "notes/intro.md").unwrap();
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0], task);

    let persisted = persisted_data(&documents);
    assert_eq!(persisted.tasks, store.tasks());
    assert!(persisted.archived.is_empty());
}

#[test]
fn add_rejects_blank_input_without_state_change() {
    let (mut store, documents, _) = empty_board();

    let err = store.add("  ", "notes/intro.md").unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);
    let err = store.add("Write intro", "").unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyFilePath);

    assert!(store.tasks().is_empty());
    // Nothing was persisted either.
    assert!(documents.content(DOC).is_none());
}

#[test]
fn added_ids_are_distinct_from_every_existing_id() {
    let existing = ProjectData {
        tasks: vec![],
        archived: vec![],
    };
    let documents =
        MemoryDocumentStore::with_document(DOC, &existing.encode().unwrap());
    let mut store =
        TaskStore::open(documents, RecordingNotifier::default(), DOC).unwrap();

    for index in 0..20 {
        store
            .add(&format!("Task {index}"), &format!("notes/{index}.md"))
            .unwrap();
    }
    let first_id = store.tasks()[0].id.clone();
    store.archive(&first_id);

    let mut ids = HashSet::new();
    for task in store.tasks().iter().chain(store.archived()) {
        assert!(ids.insert(task.id.clone()), "duplicate id {}", task.id);
    }
    assert_eq!(ids.len(), 20);
}

#[test]
fn archive_then_unarchive_restores_task_at_end_of_active() {
    let (mut store, _, _) = empty_board();
    store.add("First", "notes/a.md").unwrap();
    let target = store.add("Second", "notes/b.md").unwrap();
    store.add("Third", "notes/c.md").unwrap();

    store.archive(&target.id);
    assert_eq!(store.tasks().len(), 2);
    assert_eq!(store.archived(), &[target.clone()]);

    store.unarchive(&target.id);
    assert!(store.archived().is_empty());
    assert_eq!(store.tasks().len(), 3);
    // Appended at the end, fields unchanged.
    assert_eq!(store.tasks()[2], target);
}

#[test]
fn archive_of_unknown_id_is_noop() {
    let (mut store, _, _) = empty_board();
    store.add("Only", "notes/only.md").unwrap();

    store.archive("missing-id");
    assert_eq!(store.tasks().len(), 1);
    assert!(store.archived().is_empty());
}

#[test]
fn delete_from_wrong_sequence_is_noop() {
    let (mut store, _, _) = empty_board();
    let task = store.add("Archived later", "notes/a.md").unwrap();
    store.archive(&task.id);

    // Present only in "archived"; deleting from active must not touch it.
    store.delete(&task.id, false);
    assert!(store.tasks().is_empty());
    assert_eq!(store.archived().len(), 1);

    store.delete(&task.id, true);
    assert!(store.archived().is_empty());
}

#[test]
fn move_then_inverse_restores_original_order() {
    let (mut store, _, _) = empty_board();
    store.add("A", "notes/a.md").unwrap();
    store.add("B", "notes/b.md").unwrap();
    store.add("C", "notes/c.md").unwrap();
    let original: Vec<_> = store.tasks().to_vec();

    store.move_task(0, 2);
    assert_ne!(store.tasks(), original.as_slice());
    store.move_task(2, 0);
    assert_eq!(store.tasks(), original.as_slice());
}

#[test]
fn move_shifts_intervening_tasks() {
    let (mut store, _, _) = empty_board();
    store.add("A", "notes/a.md").unwrap();
    store.add("B", "notes/b.md").unwrap();
    store.add("C", "notes/c.md").unwrap();

    store.move_task(2, 0);
    let titles: Vec<_> = store.tasks().iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, ["C", "A", "B"]);
}

#[test]
fn out_of_range_and_same_index_moves_are_noops() {
    let (mut store, documents, _) = empty_board();
    store.add("A", "notes/a.md").unwrap();
    store.add("B", "notes/b.md").unwrap();
    let saved = documents.content(DOC).unwrap();

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    store.move_task(0, 5);
    store.move_task(7, 0);
    store.move_task(1, 1);

    assert!(events.borrow().is_empty());
    // Nothing was re-persisted either.
    assert_eq!(documents.content(DOC).unwrap(), saved);
}

#[test]
fn open_with_unparseable_content_yields_empty_store() {
    let documents = MemoryDocumentStore::with_document(DOC, "not json");
    let store = TaskStore::open(documents, RecordingNotifier::default(), DOC).unwrap();

    assert!(store.tasks().is_empty());
    assert!(store.archived().is_empty());
}

#[test]
fn open_failure_is_notified_and_surfaced() {
    let documents = MemoryDocumentStore::default();
    let notifier = RecordingNotifier::default();

    let err = TaskStore::open(documents, notifier.clone(), DOC)
        .err()
        .expect("missing document must fail association");
    assert_eq!(err.reference, DOC);
    assert!(matches!(err.source, DocumentIoError::NotFound { .. }));
    assert_eq!(notifier.messages.borrow().len(), 1);
}

#[test]
fn save_then_open_reproduces_equal_store() {
    let (mut store, documents, _) = empty_board();
    store.add("Keep", "notes/keep.md").unwrap();
    let archived = store.add("Done", "notes/done.md").unwrap();
    store.add("Tail", "notes/tail.md").unwrap();
    store.archive(&archived.id);
    store.move_task(0, 1);

    let reopened =
        TaskStore::open(documents, RecordingNotifier::default(), DOC).unwrap();
    assert_eq!(reopened.tasks(), store.tasks());
    assert_eq!(reopened.archived(), store.archived());
}

#[test]
fn write_failure_notifies_and_keeps_memory_for_retry() {
    let (mut store, documents, notifier) = empty_board();
    documents.fail_writes.set(true);

    let task = store.add("Unsaved", "notes/unsaved.md").unwrap();
    assert_eq!(store.tasks().len(), 1);
    assert!(documents.content(DOC).is_none());
    assert_eq!(notifier.messages.borrow().len(), 1);

    // The next successful save lands the retained state.
    documents.fail_writes.set(false);
    store.save();
    let persisted = persisted_data(&documents);
    assert_eq!(persisted.tasks, vec![task]);
}

#[test]
fn mutation_events_fire_in_order_with_payloads() {
    let (mut store, _, _) = empty_board();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    store.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let first = store.add("First", "notes/a.md").unwrap();
    let second = store.add("Second", "notes/b.md").unwrap();
    store.move_task(0, 1);
    store.archive(&first.id);
    store.unarchive(&first.id);
    store.delete(&second.id, false);

    let seen = events.borrow();
    assert_eq!(
        *seen,
        vec![
            StoreEvent::TaskAdded { id: first.id.clone() },
            StoreEvent::TaskAdded { id: second.id.clone() },
            StoreEvent::TasksReordered { from: 0, to: 1 },
            StoreEvent::TaskArchived { id: first.id.clone() },
            StoreEvent::TaskUnarchived { id: first.id },
            StoreEvent::TaskDeleted { id: second.id },
        ]
    );
}

#[test]
fn organizer_walkthrough_add_archive_unarchive() {
    let (mut store, _, _) = empty_board();

    let task = store.add("Write intro", "notes/intro.md").unwrap();
    assert_eq!(store.tasks()[0].title, "Write intro");
    assert_eq!(store.tasks()[0].file_path, "notes/intro.md");

    store.archive(&task.id);
    assert!(store.tasks().is_empty());
    assert_eq!(store.archived(), &[task.clone()]);

    store.unarchive(&task.id);
    assert_eq!(store.tasks(), &[task]);
    assert!(store.archived().is_empty());
}
