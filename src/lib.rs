//! Kanban: a personal task board with a configurable status workflow.
//!
//! The crate provides the task model, an ordered status workflow, a store
//! that persists the whole collection after every change, and a projector
//! that groups tasks into board columns. Rendering is left to the caller.
//!
//! # Architecture
//!
//! The board follows hexagonal architecture principles:
//!
//! - **Domain**: tasks, statuses and the workflow, with no I/O
//! - **Ports**: storage and identifier traits
//! - **Adapters**: JSON file and in-memory storage, identifier generators
//! - **Services**: the task store, the board projector and the board facade
//!
//! # Modules
//!
//! - [`task`]: everything above, grouped by layer

pub mod task;
