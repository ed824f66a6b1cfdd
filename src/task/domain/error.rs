//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or changing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The status is not part of the configured workflow.
    #[error("unknown status: {0}")]
    UnknownStatus(String),
}

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
