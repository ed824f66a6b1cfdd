//! Task store: the single owner of the task collection.

use super::PersistenceWarning;
use crate::task::{
    domain::{
        MoveDirection, MoveOutcome, NewTask, RepairPolicy, StatusName, StatusWorkflow, Task,
        TaskChanges, TaskDomainError, TaskId,
    },
    ports::{IdGenerator, SkippedRecord, TaskStorage},
};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// How many identifiers to draw before giving up on a repeating generator.
const MAX_ID_ATTEMPTS: usize = 8;

/// Errors surfaced to callers of store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskStoreError {
    /// Input failed domain validation.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// No task has the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The id generator kept producing identifiers already in use.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Owns the task collection and keeps storage in step with it.
///
/// Every successful mutation saves the whole collection before returning.
/// Storage failures never reach the caller as errors: they are logged and
/// queued as [`PersistenceWarning`]s, and the in-memory state stays
/// authoritative.
pub struct TaskStore<S, C, G>
where
    S: TaskStorage,
    C: Clock + Send + Sync,
    G: IdGenerator,
{
    storage: S,
    clock: Arc<C>,
    ids: G,
    workflow: StatusWorkflow,
    tasks: Vec<Task>,
    preserved: Vec<SkippedRecord>,
    known_ids: HashSet<TaskId>,
    warnings: Vec<PersistenceWarning>,
}

impl<S, C, G> TaskStore<S, C, G>
where
    S: TaskStorage,
    C: Clock + Send + Sync,
    G: IdGenerator,
{
    /// Creates an empty store without reading storage.
    #[must_use]
    pub fn new(storage: S, clock: Arc<C>, ids: G, workflow: StatusWorkflow) -> Self {
        Self {
            storage,
            clock,
            ids,
            workflow,
            tasks: Vec::new(),
            preserved: Vec::new(),
            known_ids: HashSet::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a store and loads the stored collection.
    #[must_use]
    pub fn open(storage: S, clock: Arc<C>, ids: G, workflow: StatusWorkflow) -> Self {
        let mut store = Self::new(storage, clock, ids, workflow);
        store.load();
        store
    }

    /// Replaces the in-memory collection with the stored one.
    ///
    /// Unreadable storage yields an empty collection and a
    /// [`PersistenceWarning::LoadFailed`]. Identifiers seen here stay
    /// reserved for the lifetime of the store.
    ///
    /// Records the storage could not decode are kept aside and written back
    /// unchanged by every later save.
    pub fn load(&mut self) -> &[Task] {
        let location = self.storage.location();
        match self.storage.load() {
            Ok(loaded) => {
                for skipped in &loaded.skipped {
                    warn!(
                        location = %location,
                        index = skipped.index,
                        reason = %skipped.reason,
                        "stored task unreadable, keeping it aside"
                    );
                    self.warnings.push(PersistenceWarning::RecordSkipped {
                        location: location.clone(),
                        index: skipped.index,
                        reason: skipped.reason.clone(),
                    });
                }
                self.preserved = loaded.skipped;

                let mut seen = HashSet::with_capacity(loaded.tasks.len());
                let mut tasks = Vec::with_capacity(loaded.tasks.len());
                for task in loaded.tasks {
                    if !seen.insert(task.id()) {
                        warn!(
                            location = %location,
                            task_id = %task.id(),
                            "dropping duplicate stored task"
                        );
                        self.warnings.push(PersistenceWarning::DuplicateRecord {
                            location: location.clone(),
                            id: task.id(),
                        });
                        continue;
                    }
                    tasks.push(task);
                }
                self.known_ids.extend(seen);
                self.tasks = tasks;
                info!(location = %location, count = self.tasks.len(), "loaded tasks");
            }
            Err(error) => {
                warn!(location = %location, error = %error, "could not load tasks, starting empty");
                self.tasks.clear();
                self.preserved.clear();
                self.warnings
                    .push(PersistenceWarning::LoadFailed { location, error });
            }
        }
        &self.tasks
    }

    /// Writes the whole collection to storage.
    ///
    /// Returns `false` when the write failed; the failure is recorded as a
    /// [`PersistenceWarning::SaveFailed`].
    pub fn save(&mut self) -> bool {
        match self.storage.save(&self.tasks, &self.preserved) {
            Ok(()) => true,
            Err(error) => {
                let location = self.storage.location();
                warn!(
                    location = %location,
                    error = %error,
                    "could not save tasks, keeping changes in memory"
                );
                self.warnings
                    .push(PersistenceWarning::SaveFailed { location, error });
                false
            }
        }
    }

    /// Creates a task from `request`, appends it and saves.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Validation`] when the title is blank, or
    /// [`TaskStoreError::DuplicateTask`] when no unused identifier could be
    /// drawn. The collection is unchanged on error.
    pub fn add(&mut self, request: NewTask) -> TaskStoreResult<Task> {
        let id = self.fresh_id()?;
        let task = Task::create(id, request, &self.workflow, &*self.clock)?;
        self.known_ids.insert(id);
        self.tasks.push(task.clone());
        info!(task_id = %id, status = %task.status(), "added task");
        self.save();
        Ok(task)
    }

    /// Applies `changes` to the task `id` and saves.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] for an unknown id and
    /// [`TaskStoreError::Validation`] when the new title is blank or the new
    /// status is not in the workflow. Nothing changes on error.
    ///
    /// An empty change set returns the task as it is, without touching
    /// `updated_at` or saving.
    pub fn update(&mut self, id: TaskId, changes: TaskChanges) -> TaskStoreResult<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id() == id)
            .ok_or(TaskStoreError::NotFound(id))?;
        if changes.is_empty() {
            return Ok(task.clone());
        }
        task.apply(changes, &self.workflow, &*self.clock)?;
        let updated = task.clone();
        debug!(task_id = %id, "updated task");
        self.save();
        Ok(updated)
    }

    /// Deletes the task `id` and saves.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no such task exists,
    /// including every repeated removal of the same id.
    pub fn remove(&mut self, id: TaskId) -> TaskStoreResult<Task> {
        let position = self.position(id)?;
        let removed = self.tasks.remove(position);
        info!(task_id = %id, "removed task");
        self.save();
        Ok(removed)
    }

    /// Moves the task one status along the workflow and saves.
    ///
    /// At the first status (moving back) or the last (moving forward) this
    /// is a no-op returning [`MoveOutcome::AtBoundary`]: no field changes and
    /// nothing is written. A task whose status is not in the workflow is
    /// relocated to the first status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] for an unknown id.
    pub fn move_status(
        &mut self,
        id: TaskId,
        direction: MoveDirection,
    ) -> TaskStoreResult<MoveOutcome> {
        let position = self.position(id)?;
        let task = self
            .tasks
            .get_mut(position)
            .ok_or(TaskStoreError::NotFound(id))?;
        let outcome = plan_move(&self.workflow, task.status(), direction);
        match &outcome {
            MoveOutcome::AtBoundary => {
                debug!(task_id = %id, ?direction, "task already at workflow boundary");
                return Ok(MoveOutcome::AtBoundary);
            }
            MoveOutcome::Moved { from, to } => {
                debug!(task_id = %id, %from, %to, "moved task");
                task.set_status(to.clone(), &*self.clock);
            }
            MoveOutcome::Relocated { from, to } => {
                warn!(task_id = %id, %from, %to, "task status not in workflow, relocating");
                task.set_status(to.clone(), &*self.clock);
            }
        }
        self.save();
        Ok(outcome)
    }

    /// Reports whether [`move_status`](Self::move_status) would change the
    /// task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] for an unknown id.
    pub fn can_move(&self, id: TaskId, direction: MoveDirection) -> TaskStoreResult<bool> {
        let task = self.get(id).ok_or(TaskStoreError::NotFound(id))?;
        Ok(plan_move(&self.workflow, task.status(), direction).changed())
    }

    /// Brings task statuses in line with the workflow.
    ///
    /// Under [`RepairPolicy::Reassign`] tasks with an unknown status move to
    /// the first status and differently cased statuses take the configured
    /// spelling; the collection is saved once if anything changed. Under
    /// [`RepairPolicy::Unassigned`] nothing is touched.
    ///
    /// Returns the number of repaired tasks.
    pub fn repair(&mut self, policy: RepairPolicy) -> usize {
        if policy == RepairPolicy::Unassigned {
            return 0;
        }
        let Some(first) = self.workflow.first().cloned() else {
            return 0;
        };

        let mut repaired = 0_usize;
        for task in &mut self.tasks {
            let target = match self.workflow.resolve(task.status().as_str()) {
                Some(canonical) if canonical == task.status() => continue,
                Some(canonical) => {
                    debug!(
                        task_id = %task.id(),
                        from = %task.status(),
                        to = %canonical,
                        "normalising status spelling"
                    );
                    canonical.clone()
                }
                None => {
                    warn!(
                        task_id = %task.id(),
                        from = %task.status(),
                        to = %first,
                        "reassigning task with unknown status"
                    );
                    first.clone()
                }
            };
            task.set_status(target, &*self.clock);
            repaired = repaired.saturating_add(1);
        }

        if repaired > 0 {
            self.save();
        }
        repaired
    }

    /// Replaces the workflow with `statuses`.
    ///
    /// Existing tasks keep their status; run [`repair`](Self::repair) or
    /// project the board to deal with statuses that disappeared.
    pub fn reconfigure_workflow<I, T>(&mut self, statuses: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.workflow.reconfigure(statuses);
        info!(
            revision = self.workflow.revision(),
            statuses = ?self.workflow.statuses(),
            "status workflow reconfigured"
        );
    }

    /// Appends `statuses` to the workflow, returning how many were new.
    pub fn extend_workflow<I, T>(&mut self, statuses: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let added = self.workflow.extend(statuses);
        if added > 0 {
            info!(
                added,
                revision = self.workflow.revision(),
                "status workflow extended"
            );
        }
        added
    }

    /// Returns the task `id`, if present.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns all tasks in collection order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of tasks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the store holds no task.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the workflow in effect.
    #[must_use]
    pub const fn workflow(&self) -> &StatusWorkflow {
        &self.workflow
    }

    /// Returns queued persistence warnings without clearing them.
    #[must_use]
    pub fn warnings(&self) -> &[PersistenceWarning] {
        &self.warnings
    }

    /// Returns and clears queued persistence warnings.
    pub fn take_warnings(&mut self) -> Vec<PersistenceWarning> {
        std::mem::take(&mut self.warnings)
    }

    fn position(&self, id: TaskId) -> TaskStoreResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id() == id)
            .ok_or(TaskStoreError::NotFound(id))
    }

    fn fresh_id(&self) -> TaskStoreResult<TaskId> {
        let mut candidate = self.ids.next_id();
        for _ in 1..MAX_ID_ATTEMPTS {
            if !self.known_ids.contains(&candidate) {
                return Ok(candidate);
            }
            warn!(task_id = %candidate, "id generator returned a used identifier, retrying");
            candidate = self.ids.next_id();
        }
        if self.known_ids.contains(&candidate) {
            return Err(TaskStoreError::DuplicateTask(candidate));
        }
        Ok(candidate)
    }
}

fn plan_move(
    workflow: &StatusWorkflow,
    status: &StatusName,
    direction: MoveDirection,
) -> MoveOutcome {
    match workflow.neighbour(status.as_str(), direction) {
        Ok(Some(target)) => MoveOutcome::Moved {
            from: status.clone(),
            to: target.clone(),
        },
        Ok(None) => MoveOutcome::AtBoundary,
        Err(_) => workflow
            .first()
            .map_or(MoveOutcome::AtBoundary, |first| MoveOutcome::Relocated {
                from: status.clone(),
                to: first.clone(),
            }),
    }
}
