//! Domain model for the kanban board.
//!
//! Tasks, their priorities and statuses, the ordered status workflow, and the
//! grouped board view. Nothing here performs I/O.

mod board;
mod error;
mod ids;
mod priority;
mod status;
mod task;
mod workflow;

pub use board::{BoardColumn, BoardView, RepairPolicy};
pub use error::{ParsePriorityError, TaskDomainError};
pub use ids::TaskId;
pub use priority::TaskPriority;
pub use status::{MoveDirection, MoveOutcome, StatusName};
pub use task::{NewTask, PersistedTaskData, Task, TaskChanges};
pub use workflow::{DEFAULT_STATUSES, INITIAL_STATUS, StatusWorkflow};
