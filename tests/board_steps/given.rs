//! Given steps for kanban board BDD scenarios.

use super::world::{BoardWorld, split_names};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;

#[given("an empty board")]
fn an_empty_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world.prepare_file()?;
    world.open_board();
    Ok(())
}

#[given(r#"a board with custom statuses "{statuses}""#)]
fn a_board_with_custom_statuses(
    world: &mut BoardWorld,
    statuses: String,
) -> Result<(), eyre::Report> {
    world.prepare_file()?;
    world.config.statuses = split_names(&statuses);
    world.open_board();
    Ok(())
}

#[given(r#"a stored task "{title}" with status "{status}""#)]
fn a_stored_task(
    world: &mut BoardWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let path = world.prepare_file()?;
    let id = uuid::Uuid::new_v4();
    let document = json!([{
        "id": id.to_string(),
        "title": title,
        "description": "",
        "status": status,
        "priority": "Low",
        "due_date": null,
        "created_at": "2024-03-01T09:00:00",
        "updated_at": "2024-03-01T09:00:00"
    }]);
    std::fs::write(&path, serde_json::to_string_pretty(&document)?)
        .wrap_err("write stored task file")?;
    world.task_id = Some(kanban::task::domain::TaskId::from_uuid(id));
    world.open_board();
    Ok(())
}
