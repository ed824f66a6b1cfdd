//! Task priority levels.

use super::ParsePriorityError;
use std::fmt;

/// Priority attached to every task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Regular work. Tasks created without a priority get this one.
    #[default]
    Important,
    /// Needs attention first.
    Urgent,
}

impl TaskPriority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Important, Self::Urgent];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Important => "Important",
            Self::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParsePriorityError;

    /// Parses a priority case-insensitively.
    ///
    /// `medium` is accepted as a legacy spelling of [`TaskPriority::Important`].
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "important" | "medium" => Ok(Self::Important),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}
