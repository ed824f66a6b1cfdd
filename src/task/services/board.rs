//! Board facade used by the presentation layer.

use super::{
    BoardConfig, BoardProjector, PersistenceWarning, StatusConfiguration, TaskStore,
    TaskStoreResult,
};
use crate::task::{
    adapters::{JsonFileTaskStorage, RandomIdGenerator},
    domain::{
        BoardView, DEFAULT_STATUSES, MoveDirection, MoveOutcome, NewTask, StatusWorkflow, Task,
        TaskChanges, TaskId,
    },
    ports::{IdGenerator, TaskStorage},
};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// Kanban board: a task store plus the projector that renders it.
pub struct KanbanBoard<S, C, G>
where
    S: TaskStorage,
    C: Clock + Send + Sync,
    G: IdGenerator,
{
    store: TaskStore<S, C, G>,
    projector: BoardProjector,
}

impl KanbanBoard<JsonFileTaskStorage, DefaultClock, RandomIdGenerator> {
    /// Opens the board described by `config` with the JSON file storage,
    /// the system clock and random identifiers.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self::open(
            JsonFileTaskStorage::new(config.data_file.clone()),
            Arc::new(DefaultClock),
            RandomIdGenerator,
            config,
        )
    }
}

impl<S, C, G> KanbanBoard<S, C, G>
where
    S: TaskStorage,
    C: Clock + Send + Sync,
    G: IdGenerator,
{
    /// Opens a board over `storage`, loading the stored tasks.
    #[must_use]
    pub fn open(storage: S, clock: Arc<C>, ids: G, config: &BoardConfig) -> Self {
        let workflow = StatusWorkflow::with_extra(config.statuses.iter().cloned());
        Self {
            store: TaskStore::open(storage, clock, ids, workflow),
            projector: BoardProjector::new(config.repair_policy),
        }
    }

    /// Returns the tasks grouped by status, repairing stale statuses first.
    pub fn list_by_status(&mut self) -> BoardView {
        self.store.repair(self.projector.policy());
        self.projector
            .project(self.store.tasks(), self.store.workflow())
    }

    /// Adds a task.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::add`].
    pub fn add_task(&mut self, request: NewTask) -> TaskStoreResult<Task> {
        self.store.add(request)
    }

    /// Edits a task.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::update`].
    pub fn edit_task(&mut self, id: TaskId, changes: TaskChanges) -> TaskStoreResult<Task> {
        self.store.update(id, changes)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::remove`].
    pub fn delete_task(&mut self, id: TaskId) -> TaskStoreResult<()> {
        self.store.remove(id).map(|_| ())
    }

    /// Moves a task one status forward or back.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::move_status`].
    pub fn move_task(
        &mut self,
        id: TaskId,
        direction: MoveDirection,
    ) -> TaskStoreResult<MoveOutcome> {
        self.store.move_status(id, direction)
    }

    /// Reports whether a move button should be enabled.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::can_move`].
    pub fn can_move(&self, id: TaskId, direction: MoveDirection) -> TaskStoreResult<bool> {
        self.store.can_move(id, direction)
    }

    /// Rebuilds the workflow as the default statuses followed by the
    /// configured extras.
    pub fn configure_statuses(&mut self, configuration: &StatusConfiguration) {
        let statuses = DEFAULT_STATUSES
            .iter()
            .map(|status| (*status).to_owned())
            .chain(configuration.extra_statuses().iter().cloned());
        self.store.reconfigure_workflow(statuses);
    }

    /// Returns the task `id`, if present.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.store.get(id)
    }

    /// Returns the workflow in effect.
    #[must_use]
    pub const fn workflow(&self) -> &StatusWorkflow {
        self.store.workflow()
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore<S, C, G> {
        &self.store
    }

    /// Returns the projector.
    #[must_use]
    pub const fn projector(&self) -> &BoardProjector {
        &self.projector
    }

    /// Returns and clears queued persistence warnings.
    pub fn take_warnings(&mut self) -> Vec<PersistenceWarning> {
        self.store.take_warnings()
    }
}
