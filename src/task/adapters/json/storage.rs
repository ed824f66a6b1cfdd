//! JSON file storage for the task collection.

use super::models::{decode_document, encode_document};
use crate::task::{
    domain::Task,
    ports::{LoadedTasks, PersistenceError, SkippedRecord, TaskStorage, TaskStorageResult},
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use tracing::debug;

/// Default file name of the task list.
pub const DEFAULT_TASK_FILE: &str = "kanban_tasks.json";

/// Stores the task list as a JSON array in a single UTF-8 file.
///
/// Every save rewrites the whole file: the contents go to a sibling
/// `.tmp` file first, which is then renamed over the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileTaskStorage {
    path: Utf8PathBuf,
}

impl Default for JsonFileTaskStorage {
    fn default() -> Self {
        Self::new(DEFAULT_TASK_FILE)
    }
}

impl JsonFileTaskStorage {
    /// Creates storage backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn split_path(&self) -> TaskStorageResult<(&Utf8Path, &str)> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| PersistenceError::InvalidPath(self.path.clone()))?;
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        Ok((parent, file_name))
    }
}

impl TaskStorage for JsonFileTaskStorage {
    fn load(&self) -> TaskStorageResult<LoadedTasks> {
        let (parent, file_name) = self.split_path()?;
        let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path, "task directory missing, starting empty");
                return Ok(LoadedTasks::default());
            }
            Err(err) => return Err(PersistenceError::io(parent, err)),
        };
        let contents = match dir.read_to_string(file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path, "task file missing, starting empty");
                return Ok(LoadedTasks::default());
            }
            Err(err) => return Err(PersistenceError::io(self.path.clone(), err)),
        };
        decode_document(&contents)
    }

    fn save(&self, tasks: &[Task], preserved: &[SkippedRecord]) -> TaskStorageResult<()> {
        let (parent, file_name) = self.split_path()?;
        let contents = encode_document(tasks, preserved)?;

        Dir::create_ambient_dir_all(parent, ambient_authority())
            .map_err(|err| PersistenceError::io(parent, err))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| PersistenceError::io(parent, err))?;

        let staging_name = format!("{file_name}.tmp");
        dir.write(&staging_name, &contents)
            .map_err(|err| PersistenceError::io(parent.join(&staging_name), err))?;
        dir.rename(&staging_name, &dir, file_name)
            .map_err(|err| PersistenceError::io(self.path.clone(), err))?;
        debug!(
            path = %self.path,
            count = tasks.len(),
            preserved = preserved.len(),
            "saved tasks"
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.to_string()
    }
}
