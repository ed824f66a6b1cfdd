//! When steps for kanban board BDD scenarios.

use super::world::BoardWorld;
use eyre::WrapErr;
use kanban::task::domain::{MoveDirection, NewTask};
use rstest_bdd_macros::when;

fn add(world: &mut BoardWorld, request: NewTask) -> Result<(), eyre::Report> {
    let result = world.board_mut()?.add_task(request);
    if let Ok(task) = &result {
        world.task_id = Some(task.id());
    }
    world.last_add_result = Some(result);
    Ok(())
}

fn step(world: &mut BoardWorld, direction: MoveDirection) -> Result<(), eyre::Report> {
    let id = world.followed_task()?;
    let outcome = world
        .board_mut()?
        .move_task(id, direction)
        .wrap_err("move task")?;
    world.last_move = Some(outcome);
    Ok(())
}

#[when(r#"I add a task titled "{title}""#)]
fn add_task_titled(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    add(world, NewTask::new(title, ""))
}

#[when(r#"I add a task "{title}" with status "{status}" and priority "{priority}""#)]
fn add_task_with_fields(
    world: &mut BoardWorld,
    title: String,
    status: String,
    priority: String,
) -> Result<(), eyre::Report> {
    add(
        world,
        NewTask::new(title, "")
            .with_status(status)
            .with_priority(priority),
    )
}

#[when("I add a task with a blank title")]
fn add_task_with_blank_title(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    add(world, NewTask::new("   ", "no title"))
}

#[when("I move the task forward")]
fn move_forward(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    step(world, MoveDirection::Forward)
}

#[when("I move the task back")]
fn move_back(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    step(world, MoveDirection::Back)
}

#[when("I reopen the board")]
fn reopen_board(world: &mut BoardWorld) {
    world.open_board();
}

#[when("I list the board")]
fn list_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world.board_mut()?.list_by_status();
    Ok(())
}
