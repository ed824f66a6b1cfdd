//! Step definitions for kanban board scenarios.

mod given;
mod when;
pub mod world;
