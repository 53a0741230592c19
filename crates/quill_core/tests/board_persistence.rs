use quill_core::{DocumentIoError, FsDocumentStore, LogNotifier, TaskStore};
use std::fs;

const DOC: &str = "projects/site.md";

#[test]
fn board_roundtrips_through_a_real_vault_directory() {
    let vault = tempfile::tempdir().unwrap();
    let documents = FsDocumentStore::new(vault.path());

    let mut store = TaskStore::empty(documents.clone(), LogNotifier, DOC);
    let kept = store.add("Write intro", "notes/intro.md").unwrap();
    let archived = store.add("Review draft", "notes/review.md").unwrap();
    store.archive(&archived.id);

    let reopened = TaskStore::open(documents, LogNotifier, DOC).unwrap();
    assert_eq!(reopened.tasks(), &[kept]);
    assert_eq!(reopened.archived(), &[archived]);
}

#[test]
fn corrupt_document_on_disk_opens_as_empty_project() {
    let vault = tempfile::tempdir().unwrap();
    let path = vault.path().join(DOC);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "## meeting notes, definitely not a board").unwrap();

    let store =
        TaskStore::open(FsDocumentStore::new(vault.path()), LogNotifier, DOC).unwrap();
    assert!(store.tasks().is_empty());
    assert!(store.archived().is_empty());
}

#[test]
fn missing_document_fails_association_with_not_found() {
    let vault = tempfile::tempdir().unwrap();

    let err = TaskStore::open(FsDocumentStore::new(vault.path()), LogNotifier, DOC)
        .err()
        .expect("missing file must fail association");
    assert!(matches!(err.source, DocumentIoError::NotFound { .. }));
}

#[test]
fn save_replaces_prior_document_content_fully() {
    let vault = tempfile::tempdir().unwrap();
    let documents = FsDocumentStore::new(vault.path());

    let mut store = TaskStore::empty(documents.clone(), LogNotifier, DOC);
    let task = store.add("Only", "notes/only.md").unwrap();
    store.delete(&task.id, false);

    let content = fs::read_to_string(vault.path().join(DOC)).unwrap();
    assert!(!content.contains("Only"));

    let reopened = TaskStore::open(documents, LogNotifier, DOC).unwrap();
    assert!(reopened.tasks().is_empty());
}
