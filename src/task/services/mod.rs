//! Application services for the task board.

mod board;
mod config;
mod projector;
mod store;
mod warning;

pub use board::KanbanBoard;
pub use config::{BoardConfig, BoardConfigError, CUSTOM_STATUSES_KEY, StatusConfiguration};
pub use projector::{BoardProjector, project};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
pub use warning::PersistenceWarning;
