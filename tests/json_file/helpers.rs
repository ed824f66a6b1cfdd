//! Shared helpers for JSON file integration tests.

use std::sync::Arc;

use camino::Utf8PathBuf;
use kanban::task::{
    adapters::{JsonFileTaskStorage, RandomIdGenerator},
    services::{BoardConfig, KanbanBoard},
};
use mockable::DefaultClock;
use rstest::fixture;
use tempfile::TempDir;

/// Board type used by the JSON file tests.
pub type FileBoard = KanbanBoard<JsonFileTaskStorage, DefaultClock, RandomIdGenerator>;

/// Temporary directory with the task file path inside it.
pub struct TaskFile {
    /// Keeps the directory alive for the test.
    pub dir: TempDir,
    /// Path of the task file.
    pub path: Utf8PathBuf,
}

impl TaskFile {
    /// Opens a board on the file with default configuration.
    pub fn open(&self) -> FileBoard {
        KanbanBoard::open(
            JsonFileTaskStorage::new(self.path.clone()),
            Arc::new(DefaultClock),
            RandomIdGenerator,
            &BoardConfig::default(),
        )
    }

    /// Reads the raw file contents.
    pub fn contents(&self) -> String {
        std::fs::read_to_string(&self.path).expect("task file readable")
    }

    /// Replaces the raw file contents.
    pub fn write(&self, contents: &str) {
        std::fs::write(&self.path, contents).expect("task file writable");
    }
}

/// Fixture providing a fresh task file location.
#[fixture]
pub fn task_file() -> TaskFile {
    let dir = TempDir::new().expect("temporary directory");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("kanban_tasks.json"))
        .expect("utf-8 temporary path");
    TaskFile { dir, path }
}
