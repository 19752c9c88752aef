//! Persisted run state for the incremental fetch

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use log::debug;
use serde::{Deserialize, Serialize};

use super::cursor::Cursor;
use crate::error::{Result, StateError};

/// The persisted run-state document: `{"lastRun": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastRun {
    #[serde(rename = "lastRun")]
    pub last_run: String,
}

impl LastRun {
    /// Parse the stored timestamp into a cursor.
    pub fn cursor(&self) -> Result<Cursor> {
        Ok(self.last_run.parse()?)
    }
}

impl From<Cursor> for LastRun {
    fn from(cursor: Cursor) -> Self {
        Self {
            last_run: cursor.to_string(),
        }
    }
}

/// Where the fetch cursor lives between runs.
pub trait RunStateStore {
    /// The last persisted state, if any run has completed.
    fn get_last_run(&self) -> Result<Option<LastRun>>;

    /// Replace the persisted state.
    fn set_last_run(&self, last_run: &LastRun) -> Result<()>;
}

/// Run state stored as a JSON file.
pub struct FileRunStateStore {
    path: PathBuf,
}

impl FileRunStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RunStateStore for FileRunStateStore {
    fn get_last_run(&self) -> Result<Option<LastRun>> {
        if !self.path.exists() {
            debug!("No run state at {}", self.path.display());
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let state = serde_json::from_str(&contents)
            .map_err(|e| StateError::Corrupt(format!("{}: {}", self.path.display(), e)))?;
        Ok(Some(state))
    }

    fn set_last_run(&self, last_run: &LastRun) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Replace atomically via a sibling temp file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(last_run)?)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!("Saved run state {} to {}", last_run.last_run, self.path.display());
        Ok(())
    }
}

/// In-memory run state. Used for dry runs and tests.
#[derive(Default)]
pub struct MemoryRunStateStore {
    current: Mutex<Option<LastRun>>,
    writes: Mutex<Vec<LastRun>>,
}

impl MemoryRunStateStore {
    /// Start from an existing state.
    pub fn seeded(last_run: Option<LastRun>) -> Self {
        Self {
            current: Mutex::new(last_run),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Every state written, in order.
    pub fn writes(&self) -> Vec<LastRun> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RunStateStore for MemoryRunStateStore {
    fn get_last_run(&self) -> Result<Option<LastRun>> {
        Ok(self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn set_last_run(&self, last_run: &LastRun) -> Result<()> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(last_run.clone());
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(last_run.clone());
        Ok(())
    }
}
