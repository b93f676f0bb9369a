//! JSON file store for [`UpdateRecord`].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::record::UpdateRecord;

/// Default location, relative to the working directory.
pub const DEFAULT_STATE_PATH: &str = "data/last_update.json";

/// Errors from state file operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed state file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads and overwrites the record at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the record, or `None` when the file does not exist yet.
    pub fn load(&self) -> Result<Option<UpdateRecord>, StateError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    /// Replaces the record on disk, creating parent directories as needed.
    pub fn save(&self, record: &UpdateRecord) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string(record)?;
        std::fs::write(&self.path, content)?;

        tracing::debug!(path = %self.path.display(), date = %record.last_update_date, "update record saved");
        Ok(())
    }
}
