//! Storage port for the persisted task collection.

use crate::task::domain::Task;
use camino::Utf8PathBuf;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task storage operations.
pub type TaskStorageResult<T> = Result<T, PersistenceError>;

/// Whole-collection persistence contract.
///
/// The board always reads and writes the complete list; there is no
/// per-task update.
pub trait TaskStorage {
    /// Reads every stored task in stored order.
    ///
    /// Missing storage is an empty collection, not an error. Records that
    /// cannot be decoded are reported in [`LoadedTasks::skipped`] while the
    /// rest load.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the storage cannot be read or its
    /// contents are not a task list.
    fn load(&self) -> TaskStorageResult<LoadedTasks>;

    /// Replaces the stored collection with `tasks`, followed by the
    /// `preserved` records exactly as they were read.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the collection cannot be written.
    fn save(&self, tasks: &[Task], preserved: &[SkippedRecord]) -> TaskStorageResult<()>;

    /// Short human-readable location used in log events.
    fn location(&self) -> String;
}

/// Tasks read from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedTasks {
    /// Tasks that decoded successfully, in stored order.
    pub tasks: Vec<Task>,
    /// Records that could not be decoded. They are handed back to
    /// [`TaskStorage::save`] so they survive the next write.
    pub skipped: Vec<SkippedRecord>,
}

impl LoadedTasks {
    /// Wraps fully decoded tasks.
    #[must_use]
    pub const fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            skipped: Vec::new(),
        }
    }
}

/// A stored record that could not be turned into a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Zero-based position of the record in the stored list.
    pub index: usize,
    /// Why the record was rejected.
    pub reason: String,
    /// The record as stored.
    pub raw: Value,
}

/// Errors returned by task storage implementations.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File or directory being accessed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: Arc<std::io::Error>,
    },

    /// The stored text is not valid JSON.
    #[error("task data is not valid JSON: {0}")]
    Malformed(Arc<serde_json::Error>),

    /// The stored JSON is valid but is not a list of tasks.
    #[error("task data must be a JSON array, found {found}")]
    NotASequence {
        /// JSON kind found at the top level.
        found: &'static str,
    },

    /// The collection could not be serialised.
    #[error("failed to encode tasks: {0}")]
    Encode(Arc<serde_json::Error>),

    /// The configured path does not name a file.
    #[error("task file path {0} has no file name")]
    InvalidPath(Utf8PathBuf),

    /// The storage backend refused the operation.
    #[error("task storage unavailable: {0}")]
    Unavailable(String),
}

impl PersistenceError {
    /// Wraps an I/O error for `path`.
    pub fn io(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(err),
        }
    }

    /// Wraps a JSON parse error.
    #[must_use]
    pub fn malformed(err: serde_json::Error) -> Self {
        Self::Malformed(Arc::new(err))
    }

    /// Wraps a JSON encoding error.
    #[must_use]
    pub fn encode(err: serde_json::Error) -> Self {
        Self::Encode(Arc::new(err))
    }
}
