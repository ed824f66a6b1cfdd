//! In-memory task storage for tests and headless use.

use std::sync::{Arc, RwLock};

use crate::task::{
    domain::Task,
    ports::{LoadedTasks, PersistenceError, SkippedRecord, TaskStorage, TaskStorageResult},
};

/// Thread-safe in-memory task storage.
///
/// Clones share the same state, so a test can keep a handle and inspect
/// what the store persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStorage {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<Task>,
    preserved: Vec<SkippedRecord>,
    save_count: usize,
    fail_loads: bool,
    fail_saves: bool,
}

impl InMemoryTaskStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-populated with `tasks`.
    #[must_use]
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let storage = Self::default();
        if let Ok(mut state) = storage.state.write() {
            state.tasks = tasks;
        }
        storage
    }

    /// Returns a copy of the stored tasks.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.state
            .read()
            .map(|state| state.tasks.clone())
            .unwrap_or_default()
    }

    /// Returns how many saves succeeded.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.state.read().map(|state| state.save_count).unwrap_or(0)
    }

    /// Makes subsequent loads fail.
    pub fn fail_loads(&self, fail: bool) {
        if let Ok(mut state) = self.state.write() {
            state.fail_loads = fail;
        }
    }

    /// Makes subsequent saves fail.
    pub fn fail_saves(&self, fail: bool) {
        if let Ok(mut state) = self.state.write() {
            state.fail_saves = fail;
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::Unavailable(err.to_string())
}

impl TaskStorage for InMemoryTaskStorage {
    fn load(&self) -> TaskStorageResult<LoadedTasks> {
        let state = self.state.read().map_err(poisoned)?;
        if state.fail_loads {
            return Err(PersistenceError::Unavailable(
                "in-memory load disabled".to_owned(),
            ));
        }
        Ok(LoadedTasks {
            tasks: state.tasks.clone(),
            skipped: state.preserved.clone(),
        })
    }

    fn save(&self, tasks: &[Task], preserved: &[SkippedRecord]) -> TaskStorageResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.fail_saves {
            return Err(PersistenceError::Unavailable(
                "in-memory save disabled".to_owned(),
            ));
        }
        state.tasks = tasks.to_vec();
        state.preserved = preserved.to_vec();
        state.save_count = state.save_count.saturating_add(1);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_owned()
    }
}
