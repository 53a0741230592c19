//! CLI probe for the plugin suite core.
//!
//! # Responsibility
//! - Verify `quill_core` linkage and drive the project board against a real
//!   vault directory without a host application.
//! - Keep output deterministic for quick local sanity checks.

use quill_core::{DocumentIoError, FsDocumentStore, LogNotifier, TaskStore};
use std::process::ExitCode;

const USAGE: &str = "usage:
  quill_cli
  quill_cli board <vault-dir> <document> list
  quill_cli board <vault-dir> <document> add <title> <file-path>
  quill_cli board <vault-dir> <document> move <from> <to>
  quill_cli board <vault-dir> <document> archive <task-id>
  quill_cli board <vault-dir> <document> unarchive <task-id>
  quill_cli board <vault-dir> <document> delete <task-id> [--archived]";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        println!("quill_core version={}", quill_core::core_version());
        return ExitCode::SUCCESS;
    }
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    match args {
        [command, vault, document, rest @ ..] if command == "board" => {
            board_command(vault, document, rest)
        }
        _ => Err("unknown command".to_string()),
    }
}

fn board_command(vault: &str, document: &str, rest: &[String]) -> Result<(), String> {
    let documents = FsDocumentStore::new(vault);
    let mut store = match TaskStore::open(documents.clone(), LogNotifier, document) {
        Ok(store) => store,
        // A document that does not exist yet is a fresh board; it is created
        // on the first save.
        Err(err) if matches!(err.source, DocumentIoError::NotFound { .. }) => {
            TaskStore::empty(documents, LogNotifier, document)
        }
        Err(err) => return Err(err.to_string()),
    };

    match rest {
        [action] if action == "list" => {
            print_board(&store);
            Ok(())
        }
        [action, title, file_path] if action == "add" => {
            let task = store
                .add(title, file_path)
                .map_err(|err| err.to_string())?;
            println!("added {} {}", task.id, task.title);
            Ok(())
        }
        [action, from, to] if action == "move" => {
            let from: usize = from
                .parse()
                .map_err(|_| "move indices must be numbers".to_string())?;
            let to: usize = to
                .parse()
                .map_err(|_| "move indices must be numbers".to_string())?;
            store.move_task(from, to);
            print_board(&store);
            Ok(())
        }
        [action, task_id] if action == "archive" => {
            store.archive(task_id);
            print_board(&store);
            Ok(())
        }
        [action, task_id] if action == "unarchive" => {
            store.unarchive(task_id);
            print_board(&store);
            Ok(())
        }
        [action, task_id, rest @ ..] if action == "delete" => {
            let from_archive = matches!(rest, [flag] if flag == "--archived");
            if !rest.is_empty() && !from_archive {
                return Err("unknown delete flag".to_string());
            }
            store.delete(task_id, from_archive);
            print_board(&store);
            Ok(())
        }
        _ => Err("unknown board action".to_string()),
    }
}

fn print_board(store: &TaskStore<FsDocumentStore, LogNotifier>) {
    println!("tasks:");
    for (index, task) in store.tasks().iter().enumerate() {
        println!("  {index}. [{}] {} -> {}", task.id, task.title, task.file_path);
    }
    println!("archived:");
    for task in store.archived() {
        println!("  [{}] {} -> {}", task.id, task.title, task.file_path);
    }
}
