//! Every board change is written to the task file.

use super::helpers::{TaskFile, task_file};
use kanban::task::{
    adapters::JsonFileTaskStorage,
    domain::{MoveDirection, NewTask, Task, TaskChanges, TaskPriority},
    ports::TaskStorage,
};
use rstest::rstest;
use serde_json::Value;

fn stored(file: &TaskFile) -> Vec<Value> {
    serde_json::from_str(&file.contents()).expect("task file is a JSON array")
}

#[rstest]
fn each_operation_rewrites_the_file(task_file: TaskFile) {
    let mut board = task_file.open();
    assert!(!task_file.path.exists());

    let task = board
        .add_task(NewTask::new("Persist me", "").with_priority("urgent"))
        .expect("task should be added");
    assert_eq!(stored(&task_file).len(), 1);

    board
        .edit_task(task.id(), TaskChanges::new().with_due_date("2024-06-30"))
        .expect("edit should succeed");
    assert_eq!(
        stored(&task_file)
            .first()
            .and_then(|record| record.get("due_date"))
            .and_then(Value::as_str),
        Some("2024-06-30")
    );

    board
        .move_task(task.id(), MoveDirection::Forward)
        .expect("move should succeed");
    assert_eq!(
        stored(&task_file)
            .first()
            .and_then(|record| record.get("status"))
            .and_then(Value::as_str),
        Some("InProgress")
    );

    board.delete_task(task.id()).expect("delete should succeed");
    assert_eq!(task_file.contents(), "[]\n");
}

#[rstest]
fn reopening_restores_identical_tasks(task_file: TaskFile) {
    let mut board = task_file.open();
    let first = board
        .add_task(NewTask::new("First", "details").with_due_date("2024-07-01"))
        .expect("added");
    let second = board
        .add_task(NewTask::new("Second", "").with_status("Done"))
        .expect("added");
    let written = task_file.contents();

    let reopened = task_file.open();

    assert_eq!(reopened.store().tasks(), [first, second].as_slice());
    assert_eq!(
        reopened
            .store()
            .tasks()
            .last()
            .map(Task::priority),
        Some(TaskPriority::Important)
    );

    let storage = JsonFileTaskStorage::new(task_file.path.clone());
    let loaded = storage.load().expect("task file loads");
    storage.save(&loaded.tasks, &loaded.skipped).expect("task file saves");
    assert_eq!(task_file.contents(), written);
}

#[rstest]
fn reloaded_identifiers_are_not_reused(task_file: TaskFile) {
    let mut board = task_file.open();
    let original = board.add_task(NewTask::new("Original", "")).expect("added");
    drop(board);

    let mut reopened = task_file.open();
    let added = reopened.add_task(NewTask::new("Added", "")).expect("added");

    assert_ne!(added.id(), original.id());
    assert_eq!(reopened.store().len(), 2);
}
