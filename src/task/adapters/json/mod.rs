//! JSON file adapter for task persistence.

mod models;
mod storage;

pub use storage::{DEFAULT_TASK_FILE, JsonFileTaskStorage};
