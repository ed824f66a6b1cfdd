//! Adapter implementations of the task ports.

pub mod identity;
pub mod json;
pub mod memory;

pub use identity::{RandomIdGenerator, SequentialIdGenerator};
pub use json::{DEFAULT_TASK_FILE, JsonFileTaskStorage};
pub use memory::InMemoryTaskStorage;
