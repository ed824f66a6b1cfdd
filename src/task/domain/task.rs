//! Task aggregate and the change sets applied to it.

use super::{
    INITIAL_STATUS, StatusName, StatusWorkflow, TaskDomainError, TaskId, TaskPriority,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::warn;

/// Input for creating a task.
///
/// Status and priority are kept as raw text: the values come straight from
/// the presentation layer and are coerced to defaults when they do not
/// parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: String,
    status: Option<String>,
    priority: Option<String>,
    due_date: Option<String>,
}

impl NewTask {
    /// Creates a request with a title and description.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Sets the requested status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the requested priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the due date text.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}

/// Field changes for an existing task.
///
/// Fields left unset keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<String>,
    description: Option<String>,
    priority: Option<TaskPriority>,
    due_date: Option<Option<String>>,
    status: Option<String>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the due date. Blank text clears it.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(Some(due_date.into()));
        self
    }

    /// Clears the due date.
    #[must_use]
    pub fn without_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Sets the status directly. It must be part of the workflow.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }
}

/// A single work item on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: StatusName,
    priority: TaskPriority,
    due_date: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted status, which may no longer be configured.
    pub status: StatusName,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted due date text.
    pub due_date: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task from user input.
    ///
    /// An omitted or unknown status falls back to the first status of
    /// `workflow`, and an omitted or unknown priority to
    /// [`TaskPriority::Important`]. Both coercions are logged, never
    /// returned as errors.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn create(
        id: TaskId,
        request: NewTask,
        workflow: &StatusWorkflow,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let title = normalize_title(&request.title)?;
        let status = initial_status(request.status.as_deref(), workflow);
        let priority = initial_priority(request.priority.as_deref());
        let timestamp = clock.utc();

        Ok(Self {
            id,
            title,
            description: request.description,
            status,
            priority,
            due_date: normalize_due_date(request.due_date),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// A modification timestamp earlier than the creation timestamp is
    /// raised to the creation timestamp.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at.max(data.created_at),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> &StatusName {
        &self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date text, if any.
    #[must_use]
    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies `changes` after validating all of them.
    ///
    /// Nothing is modified when validation fails.
    pub(crate) fn apply(
        &mut self,
        changes: TaskChanges,
        workflow: &StatusWorkflow,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let title = changes
            .title
            .as_deref()
            .map(normalize_title)
            .transpose()?;
        let status = match changes.status.as_deref() {
            Some(raw) => Some(
                workflow
                    .resolve(raw)
                    .cloned()
                    .ok_or_else(|| TaskDomainError::UnknownStatus(raw.to_owned()))?,
            ),
            None => None,
        };

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = changes.description {
            self.description = value;
        }
        if let Some(value) = changes.priority {
            self.priority = value;
        }
        if let Some(value) = changes.due_date {
            self.due_date = normalize_due_date(value);
        }
        if let Some(value) = status {
            self.status = value;
        }
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to `status` and refreshes the modification timestamp.
    pub(crate) fn set_status(&mut self, status: StatusName, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Refreshes `updated_at`, never moving it backwards.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc().max(self.updated_at);
    }
}

fn normalize_title(raw: &str) -> Result<String, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

fn normalize_due_date(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn initial_status(requested: Option<&str>, workflow: &StatusWorkflow) -> StatusName {
    if let Some(status) = requested.and_then(|raw| workflow.resolve(raw)) {
        return status.clone();
    }
    let fallback = workflow
        .first()
        .cloned()
        .unwrap_or_else(|| StatusName::new(INITIAL_STATUS));
    if let Some(raw) = requested {
        warn!(
            requested = raw,
            fallback = %fallback,
            "invalid task status, using the first workflow status"
        );
    }
    fallback
}

fn initial_priority(requested: Option<&str>) -> TaskPriority {
    let Some(raw) = requested else {
        return TaskPriority::default();
    };
    TaskPriority::try_from(raw).unwrap_or_else(|err| {
        warn!(
            requested = raw,
            fallback = %TaskPriority::default(),
            error = %err,
            "invalid task priority, using the default"
        );
        TaskPriority::default()
    })
}
