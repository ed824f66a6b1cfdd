//! Status names and move directions.

use std::fmt;

/// Name of a board status column, such as `Todo`.
///
/// A status name on its own says nothing about validity; membership is
/// decided by the [`StatusWorkflow`](super::StatusWorkflow) in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusName(String);

impl StatusName {
    /// Creates a status name, trimming surrounding whitespace.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.len() == raw.len() {
            return Self(raw);
        }
        Self(trimmed.to_owned())
    }

    /// Returns the status name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the name is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    /// Compares against `other` ignoring ASCII case and surrounding
    /// whitespace.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl AsRef<str> for StatusName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StatusName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StatusName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StatusName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Direction of a single-step move along the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards the last status.
    Forward,
    /// Towards the first status.
    Back,
}

impl MoveDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Back,
            Self::Back => Self::Forward,
        }
    }
}

/// Result of asking the store to move a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The task moved to the neighbouring status.
    Moved {
        /// Status before the move.
        from: StatusName,
        /// Status after the move.
        to: StatusName,
    },
    /// The task already sits at the end of the workflow in the requested
    /// direction; nothing changed.
    AtBoundary,
    /// The task's status was not in the workflow, so it was placed in the
    /// first status instead.
    Relocated {
        /// Unrecognized status the task carried.
        from: StatusName,
        /// First status of the workflow.
        to: StatusName,
    },
}

impl MoveOutcome {
    /// Returns `true` when the task was changed.
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self, Self::AtBoundary)
    }
}
