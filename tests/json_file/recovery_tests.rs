//! The board starts from whatever it can recover from the task file.

use super::helpers::{TaskFile, task_file};
use kanban::task::{
    domain::NewTask,
    services::PersistenceWarning,
};
use rstest::rstest;

#[rstest]
fn missing_file_starts_empty_without_warnings(task_file: TaskFile) {
    let mut board = task_file.open();
    assert!(board.store().is_empty());
    assert!(board.take_warnings().is_empty());
}

#[rstest]
#[case("this is not json")]
#[case("{\"tasks\": []}")]
fn unreadable_file_starts_empty_and_is_replaced_on_save(
    task_file: TaskFile,
    #[case] contents: &str,
) {
    task_file.write(contents);

    let mut board = task_file.open();

    assert!(board.store().is_empty());
    assert!(matches!(
        board.take_warnings().as_slice(),
        [PersistenceWarning::LoadFailed { .. }]
    ));

    board.add_task(NewTask::new("Fresh start", "")).expect("added");
    let records: Vec<serde_json::Value> =
        serde_json::from_str(&task_file.contents()).expect("file rewritten as an array");
    assert_eq!(records.len(), 1);
}

#[rstest]
fn invalid_records_are_skipped(task_file: TaskFile) {
    task_file.write(
        r#"[
    {"id": "00000000-0000-0000-0000-000000000001", "title": "Kept",
     "status": "Todo", "priority": "Low",
     "created_at": "2024-01-01T10:00:00", "updated_at": "2024-01-01T10:00:00"},
    {"id": "00000000-0000-0000-0000-000000000002", "title": "",
     "created_at": "2024-01-01T10:00:00", "updated_at": "2024-01-01T10:00:00"},
    {"id": "00000000-0000-0000-0000-000000000001", "title": "Duplicate",
     "created_at": "2024-01-01T10:00:00", "updated_at": "2024-01-01T10:00:00"}
]"#,
    );

    let mut board = task_file.open();

    let titles: Vec<&str> = board.store().tasks().iter().map(|task| task.title()).collect();
    assert_eq!(titles, vec!["Kept"]);
    assert!(matches!(
        board.take_warnings().as_slice(),
        [
            PersistenceWarning::RecordSkipped { index: 1, .. },
            PersistenceWarning::DuplicateRecord { .. },
        ]
    ));

    board.add_task(NewTask::new("Later", "")).expect("added");
    let records: Vec<serde_json::Value> =
        serde_json::from_str(&task_file.contents()).expect("file rewritten as an array");
    let titles: Vec<&str> = records
        .iter()
        .filter_map(|record| record.get("title").and_then(serde_json::Value::as_str))
        .collect();
    assert_eq!(titles, vec!["Kept", "Later", ""]);
}

#[rstest]
fn unreadable_records_survive_later_saves(task_file: TaskFile) {
    task_file.write(
        r#"[
    {"id": "not-a-uuid", "title": "Hand edited", "status": "Todo",
     "created_at": "2024-01-01T10:00:00", "updated_at": "2024-01-01T10:00:00"}
]"#,
    );

    let mut board = task_file.open();
    assert!(board.store().is_empty());
    board.add_task(NewTask::new("New", "")).expect("added");
    drop(board);

    let records: Vec<serde_json::Value> =
        serde_json::from_str(&task_file.contents()).expect("file rewritten as an array");
    let titles: Vec<&str> = records
        .iter()
        .filter_map(|record| record.get("title").and_then(serde_json::Value::as_str))
        .collect();
    assert_eq!(titles, vec!["New", "Hand edited"]);
    assert_eq!(
        records.get(1).and_then(|record| record.get("id")),
        Some(&serde_json::json!("not-a-uuid"))
    );

    let reopened = task_file.open();
    assert_eq!(reopened.store().len(), 1);
}

#[rstest]
fn unwritable_location_keeps_changes_in_memory(task_file: TaskFile) {
    std::fs::create_dir(&task_file.path).expect("directory in place of the file");

    let mut board = task_file.open();
    let task = board.add_task(NewTask::new("Memory only", "")).expect("added");

    assert_eq!(board.task(task.id()).map(|found| found.title()), Some("Memory only"));
    assert!(board
        .take_warnings()
        .iter()
        .any(|warning| matches!(warning, PersistenceWarning::SaveFailed { .. })));
}
