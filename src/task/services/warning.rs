//! Recoverable persistence problems reported by the store.

use crate::task::{domain::TaskId, ports::PersistenceError};
use thiserror::Error;

/// Persistence problem that the store absorbed.
///
/// The store keeps working in memory when storage misbehaves; these values
/// let the presentation layer tell the user that data may not be durable.
#[derive(Debug, Clone, Error)]
pub enum PersistenceWarning {
    /// The stored collection could not be read; the board started empty.
    #[error("could not load tasks from {location}: {error}")]
    LoadFailed {
        /// Storage location.
        location: String,
        /// Underlying failure.
        #[source]
        error: PersistenceError,
    },

    /// A single stored record could not be read. It is left out of the
    /// board and written back unchanged on save.
    #[error("could not read stored task #{index} in {location}: {reason}")]
    RecordSkipped {
        /// Storage location.
        location: String,
        /// Zero-based record position.
        index: usize,
        /// Why the record was rejected.
        reason: String,
    },

    /// A stored record repeated an id already loaded; the first one was kept.
    #[error("dropped duplicate stored task {id} in {location}")]
    DuplicateRecord {
        /// Storage location.
        location: String,
        /// Repeated identifier.
        id: TaskId,
    },

    /// Writing the collection failed; the change only exists in memory.
    #[error("could not save tasks to {location}: {error}")]
    SaveFailed {
        /// Storage location.
        location: String,
        /// Underlying failure.
        #[source]
        error: PersistenceError,
    },
}
