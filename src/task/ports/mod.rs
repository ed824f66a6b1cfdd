//! Port contracts for the task store.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod identity;
pub mod storage;

pub use identity::IdGenerator;
pub use storage::{LoadedTasks, PersistenceError, SkippedRecord, TaskStorage, TaskStorageResult};
