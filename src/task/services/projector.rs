//! Board projector: groups tasks into status columns.

use crate::task::domain::{BoardColumn, BoardView, RepairPolicy, StatusName, StatusWorkflow, Task};
use tracing::{debug, warn};

/// Groups tasks by status for rendering.
///
/// The column layout is cached per workflow revision and rebuilt when the
/// workflow changes.
#[derive(Debug, Clone, Default)]
pub struct BoardProjector {
    policy: RepairPolicy,
    layout: Option<ColumnLayout>,
    rebuilds: usize,
}

#[derive(Debug, Clone)]
struct ColumnLayout {
    revision: u64,
    statuses: Vec<StatusName>,
}

impl BoardProjector {
    /// Creates a projector applying `policy` to unknown statuses.
    #[must_use]
    pub const fn new(policy: RepairPolicy) -> Self {
        Self {
            policy,
            layout: None,
            rebuilds: 0,
        }
    }

    /// Returns the policy for unknown statuses.
    #[must_use]
    pub const fn policy(&self) -> RepairPolicy {
        self.policy
    }

    /// Changes the policy for unknown statuses.
    pub const fn set_policy(&mut self, policy: RepairPolicy) {
        self.policy = policy;
    }

    /// Returns how many times the column layout was built.
    #[must_use]
    pub const fn layout_rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Groups `tasks` into one column per workflow status.
    pub fn project(&mut self, tasks: &[Task], workflow: &StatusWorkflow) -> BoardView {
        let policy = self.policy;
        let statuses = self.layout_for(workflow);
        project_columns(tasks, statuses, policy)
    }

    fn layout_for(&mut self, workflow: &StatusWorkflow) -> &[StatusName] {
        let stale = self.layout.as_ref().is_none_or(|layout| {
            layout.revision != workflow.revision() || layout.statuses != workflow.statuses()
        });
        if stale {
            debug!(
                revision = workflow.revision(),
                columns = workflow.len(),
                "rebuilding board columns"
            );
            self.layout = Some(ColumnLayout {
                revision: workflow.revision(),
                statuses: workflow.statuses().to_vec(),
            });
            self.rebuilds = self.rebuilds.saturating_add(1);
        }
        self.layout
            .as_ref()
            .map(|layout| layout.statuses.as_slice())
            .unwrap_or_default()
    }
}

/// Groups `tasks` by the statuses of `workflow` without caching.
///
/// Tasks keep collection order within a column. A task whose status is not
/// in the workflow goes to the first column under
/// [`RepairPolicy::Reassign`] and to [`BoardView::unassigned`] under
/// [`RepairPolicy::Unassigned`]. With no statuses at all every task is
/// unassigned.
#[must_use]
pub fn project(tasks: &[Task], workflow: &StatusWorkflow, policy: RepairPolicy) -> BoardView {
    project_columns(tasks, workflow.statuses(), policy)
}

fn project_columns(tasks: &[Task], statuses: &[StatusName], policy: RepairPolicy) -> BoardView {
    let mut columns: Vec<BoardColumn> = statuses.iter().cloned().map(BoardColumn::new).collect();
    let mut unassigned = Vec::new();

    for task in tasks {
        let matched = statuses
            .iter()
            .position(|status| status.matches(task.status().as_str()));
        let slot = match (matched, policy) {
            (Some(index), _) => Some(index),
            (None, RepairPolicy::Reassign) if !columns.is_empty() => {
                warn!(
                    task_id = %task.id(),
                    status = %task.status(),
                    "showing task with unknown status in the first column"
                );
                Some(0)
            }
            (None, _) => None,
        };
        match slot.and_then(|index| columns.get_mut(index)) {
            Some(column) => column.push(task.clone()),
            None => unassigned.push(task.clone()),
        }
    }

    BoardView::new(columns, unassigned)
}
