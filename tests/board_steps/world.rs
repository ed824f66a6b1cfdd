//! Shared world state for kanban board BDD scenarios.

use camino::Utf8PathBuf;
use kanban::task::{
    adapters::{JsonFileTaskStorage, RandomIdGenerator},
    domain::{MoveOutcome, Task, TaskId},
    services::{BoardConfig, KanbanBoard, TaskStoreError},
};
use mockable::DefaultClock;
use rstest::fixture;
use tempfile::TempDir;

/// Board type used by the BDD world.
pub type TestBoard = KanbanBoard<JsonFileTaskStorage, DefaultClock, RandomIdGenerator>;

/// Scenario world for kanban board behaviour tests.
pub struct BoardWorld {
    /// Directory holding the task file.
    pub dir: Option<TempDir>,
    /// Configuration used to open the board.
    pub config: BoardConfig,
    /// Board under test.
    pub board: Option<TestBoard>,
    /// Task the scenario is following.
    pub task_id: Option<TaskId>,
    /// Result of the last add attempt.
    pub last_add_result: Option<Result<Task, TaskStoreError>>,
    /// Outcome of the last move.
    pub last_move: Option<MoveOutcome>,
}

impl BoardWorld {
    /// Creates a world with no board opened yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: None,
            config: BoardConfig::default(),
            board: None,
            task_id: None,
            last_add_result: None,
            last_move: None,
        }
    }

    /// Points the configuration at a fresh temporary task file.
    pub fn prepare_file(&mut self) -> Result<Utf8PathBuf, eyre::Report> {
        let dir = TempDir::new()?;
        let path = Utf8PathBuf::from_path_buf(dir.path().join("kanban_tasks.json"))
            .map_err(|path| eyre::eyre!("temporary path is not UTF-8: {}", path.display()))?;
        self.config.data_file = path.clone();
        self.dir = Some(dir);
        Ok(path)
    }

    /// Opens (or reopens) the board from the configured file.
    pub fn open_board(&mut self) {
        self.board = Some(KanbanBoard::from_config(&self.config));
    }

    /// Returns the open board.
    pub fn board_mut(&mut self) -> Result<&mut TestBoard, eyre::Report> {
        self.board
            .as_mut()
            .ok_or_else(|| eyre::eyre!("no board opened in scenario world"))
    }

    /// Returns the followed task id.
    pub fn followed_task(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("no task recorded in scenario world"))
    }

    /// Reads the task file as JSON records.
    pub fn stored_records(&self) -> Result<Vec<serde_json::Value>, eyre::Report> {
        let text = std::fs::read_to_string(&self.config.data_file)?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Splits a comma-separated list of names.
pub fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}
