//! Read-only board view grouped by status.

use super::{StatusName, Task, TaskId};
use serde::{Deserialize, Serialize};

/// What to do with tasks whose status is not in the workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairPolicy {
    /// Move such tasks to the first status. The store persists the change.
    #[default]
    Reassign,
    /// Leave the tasks untouched and list them in a separate bucket.
    Unassigned,
}

/// One status column of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    status: StatusName,
    tasks: Vec<Task>,
}

impl BoardColumn {
    pub(crate) const fn new(status: StatusName) -> Self {
        Self {
            status,
            tasks: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Returns the column status.
    #[must_use]
    pub const fn status(&self) -> &StatusName {
        &self.status
    }

    /// Returns the tasks in collection order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

/// Tasks grouped into workflow-ordered columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    columns: Vec<BoardColumn>,
    unassigned: Vec<Task>,
}

impl BoardView {
    pub(crate) const fn new(columns: Vec<BoardColumn>, unassigned: Vec<Task>) -> Self {
        Self {
            columns,
            unassigned,
        }
    }

    /// Returns the columns in workflow order.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Returns the tasks of the column named `status`, ignoring case.
    #[must_use]
    pub fn column(&self, status: &str) -> Option<&[Task]> {
        self.columns
            .iter()
            .find(|column| column.status.matches(status))
            .map(BoardColumn::tasks)
    }

    /// Returns tasks that fit no column.
    ///
    /// Only populated under [`RepairPolicy::Unassigned`], or when the
    /// workflow has no statuses at all.
    #[must_use]
    pub fn unassigned(&self) -> &[Task] {
        &self.unassigned
    }

    /// Returns the column status that lists `id`, or `None` when the task is
    /// unassigned or absent.
    #[must_use]
    pub fn status_of(&self, id: TaskId) -> Option<&StatusName> {
        self.columns
            .iter()
            .find(|column| column.tasks.iter().any(|task| task.id() == id))
            .map(BoardColumn::status)
    }

    /// Returns the number of tasks across columns and the unassigned bucket.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.columns
            .iter()
            .map(|column| column.tasks.len())
            .sum::<usize>()
            .saturating_add(self.unassigned.len())
    }
}
