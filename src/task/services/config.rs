//! Board configuration.

use crate::task::{adapters::DEFAULT_TASK_FILE, domain::RepairPolicy};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// Key under which theme files list extra statuses.
pub const CUSTOM_STATUSES_KEY: &str = "CUSTOM.STATUSES";

/// Settings for opening a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Path of the JSON task file.
    pub data_file: Utf8PathBuf,
    /// What to do with tasks whose status is not configured.
    pub repair_policy: RepairPolicy,
    /// Statuses appended after the default ones.
    pub statuses: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            data_file: Utf8PathBuf::from(DEFAULT_TASK_FILE),
            repair_policy: RepairPolicy::default(),
            statuses: Vec::new(),
        }
    }
}

/// Errors returned while reading board configuration.
#[derive(Debug, Error)]
pub enum BoardConfigError {
    /// The configuration text is not valid.
    #[error("invalid board configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BoardConfig {
    /// Parses configuration from JSON text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BoardConfigError::Parse`] for malformed JSON, unknown keys
    /// or values of the wrong type.
    pub fn from_json_str(text: &str) -> Result<Self, BoardConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns the extra statuses as a [`StatusConfiguration`].
    #[must_use]
    pub fn status_configuration(&self) -> StatusConfiguration {
        StatusConfiguration::new(self.statuses.iter().cloned())
    }
}

/// Extra statuses supplied by an external theme or configuration loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusConfiguration {
    extra: Vec<String>,
}

impl StatusConfiguration {
    /// Wraps an ordered list of extra status names.
    #[must_use]
    pub fn new(extra: impl IntoIterator<Item = String>) -> Self {
        Self {
            extra: extra.into_iter().collect(),
        }
    }

    /// Reads extra statuses from already-parsed theme entries.
    ///
    /// Only [`CUSTOM_STATUSES_KEY`] is consulted. It may hold a list of
    /// strings or a single string; anything else is ignored with a warning.
    #[must_use]
    pub fn from_entries(entries: &Map<String, Value>) -> Self {
        let Some(value) = entries.get(CUSTOM_STATUSES_KEY) else {
            return Self::default();
        };
        let extra = match value {
            Value::Array(items) => items
                .iter()
                .filter_map(|item| {
                    if let Value::String(name) = item {
                        return Some(name.clone());
                    }
                    warn!(entry = %item, "ignoring non-text custom status");
                    None
                })
                .collect(),
            Value::String(name) => vec![name.clone()],
            other => {
                warn!(value = %other, "custom statuses must be a list of names");
                Vec::new()
            }
        };
        Self { extra }
    }

    /// Returns the extra statuses in order.
    #[must_use]
    pub fn extra_statuses(&self) -> &[String] {
        &self.extra
    }
}
