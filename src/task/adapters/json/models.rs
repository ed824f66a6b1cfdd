//! Serde record model for the task file.

use crate::task::{
    domain::{PersistedTaskData, StatusName, Task, TaskId, TaskPriority},
    ports::{LoadedTasks, PersistenceError, SkippedRecord, TaskStorageResult},
};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Naive timestamp layout written by older versions of the board.
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// One task as stored in the JSON array.
///
/// Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TaskRecord {
    pub(super) fn from_task(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().to_owned(),
            description: Some(task.description().to_owned()),
            status: Some(task.status().as_str().to_owned()),
            priority: Some(task.priority().as_str().to_owned()),
            due_date: task.due_date().map(str::to_owned),
            created_at: format_timestamp(task.created_at()),
            updated_at: format_timestamp(task.updated_at()),
        }
    }

    /// Converts the record into a task, rejecting records that would break
    /// task invariants.
    pub(super) fn into_task(self) -> Result<Task, String> {
        let Self {
            id: raw_id,
            title: raw_title,
            description,
            status,
            priority,
            due_date,
            created_at: raw_created_at,
            updated_at: raw_updated_at,
        } = self;

        let id = raw_id
            .parse::<TaskId>()
            .map_err(|err| format!("invalid id '{raw_id}': {err}"))?;
        let title = raw_title.trim();
        if title.is_empty() {
            return Err(format!("task {id} has an empty title"));
        }
        let created_at = parse_timestamp(&raw_created_at)
            .ok_or_else(|| format!("task {id} has an invalid created_at '{raw_created_at}'"))?;
        let updated_at = parse_timestamp(&raw_updated_at)
            .ok_or_else(|| format!("task {id} has an invalid updated_at '{raw_updated_at}'"))?;

        let data = PersistedTaskData {
            id,
            title: title.to_owned(),
            description: description.unwrap_or_default(),
            status: StatusName::new(status.unwrap_or_default()),
            priority: record_priority(id, priority.as_deref()),
            due_date: due_date.filter(|value| !value.trim().is_empty()),
            created_at,
            updated_at,
        };
        Ok(Task::from_persisted(data))
    }
}

/// Decodes the whole file contents.
///
/// # Errors
///
/// Returns [`PersistenceError::Malformed`] for invalid JSON and
/// [`PersistenceError::NotASequence`] when the top level is not an array.
pub(super) fn decode_document(text: &str) -> TaskStorageResult<LoadedTasks> {
    let document: Value = serde_json::from_str(text).map_err(PersistenceError::malformed)?;
    let Value::Array(entries) = document else {
        return Err(PersistenceError::NotASequence {
            found: json_kind(&document),
        });
    };

    let mut loaded = LoadedTasks::default();
    for (index, entry) in entries.into_iter().enumerate() {
        let decoded = TaskRecord::deserialize(&entry)
            .map_err(|err| err.to_string())
            .and_then(TaskRecord::into_task);
        match decoded {
            Ok(task) => loaded.tasks.push(task),
            Err(reason) => loaded.skipped.push(SkippedRecord {
                index,
                reason,
                raw: entry,
            }),
        }
    }
    Ok(loaded)
}

/// One element of the written array.
#[derive(Serialize)]
#[serde(untagged)]
enum Entry<'a> {
    Task(TaskRecord),
    Preserved(&'a Value),
}

/// Encodes tasks as a four-space indented JSON array with a trailing newline.
///
/// `preserved` records follow the tasks, unchanged.
///
/// # Errors
///
/// Returns [`PersistenceError::Encode`] if serialisation fails.
pub(super) fn encode_document(
    tasks: &[Task],
    preserved: &[SkippedRecord],
) -> TaskStorageResult<Vec<u8>> {
    let records: Vec<Entry<'_>> = tasks
        .iter()
        .map(|task| Entry::Task(TaskRecord::from_task(task)))
        .chain(preserved.iter().map(|record| Entry::Preserved(&record.raw)))
        .collect();
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records
        .serialize(&mut serializer)
        .map_err(PersistenceError::encode)?;
    buffer.push(b'\n');
    Ok(buffer)
}

fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses RFC 3339, falling back to naive ISO 8601 read as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|value| value.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, LEGACY_TIMESTAMP_FORMAT)
                .map(|value| value.and_utc())
        })
        .ok()
}

fn record_priority(id: TaskId, raw: Option<&str>) -> TaskPriority {
    let Some(value) = raw else {
        return TaskPriority::default();
    };
    TaskPriority::try_from(value).unwrap_or_else(|err| {
        warn!(task_id = %id, error = %err, "stored priority not recognized, using the default");
        TaskPriority::default()
    })
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
