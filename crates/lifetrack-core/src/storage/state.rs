//! Persistence seam for streak and multiplier state.
//!
//! The engine never reaches for globals; callers load a snapshot through a
//! [`StateRepository`], run the engine, and save what changed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::StorageError;
use crate::multipliers::MultiplierState;
use crate::streak::StreakState;

/// Streak state file name.
const STREAK_FILE: &str = "streak.json";
/// Multiplier state file name.
const MULTIPLIERS_FILE: &str = "multipliers.json";

/// Load and save the engine's persisted state.
pub trait StateRepository {
    /// Stored streak, or the empty state when none was saved yet.
    fn load_streak(&self) -> Result<StreakState, StorageError>;
    fn save_streak(&self, state: &StreakState) -> Result<(), StorageError>;
    /// Stored multipliers, or an empty table when none were saved yet.
    fn load_multipliers(&self) -> Result<MultiplierState, StorageError>;
    fn save_multipliers(&self, state: &MultiplierState) -> Result<(), StorageError>;
}

/// Repository kept in process memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    streak: Mutex<StreakState>,
    multipliers: Mutex<MultiplierState>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(streak: StreakState, multipliers: MultiplierState) -> Self {
        Self {
            streak: Mutex::new(streak),
            multipliers: Mutex::new(multipliers),
        }
    }
}

impl StateRepository for InMemoryRepository {
    fn load_streak(&self) -> Result<StreakState, StorageError> {
        self.streak
            .lock()
            .map(|s| s.clone())
            .map_err(|_| StorageError::Poisoned)
    }

    fn save_streak(&self, state: &StreakState) -> Result<(), StorageError> {
        let mut guard = self.streak.lock().map_err(|_| StorageError::Poisoned)?;
        *guard = state.clone();
        Ok(())
    }

    fn load_multipliers(&self) -> Result<MultiplierState, StorageError> {
        self.multipliers
            .lock()
            .map(|m| m.clone())
            .map_err(|_| StorageError::Poisoned)
    }

    fn save_multipliers(&self, state: &MultiplierState) -> Result<(), StorageError> {
        let mut guard = self.multipliers.lock().map_err(|_| StorageError::Poisoned)?;
        *guard = state.clone();
        Ok(())
    }
}

/// Repository backed by pretty-printed JSON files in one directory.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    /// Repository rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T, StorageError> {
        let path = self.dir.join(file);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no stored state, using default");
                return Ok(T::default());
            }
            Err(source) => return Err(StorageError::ReadFailed { path, source }),
        };
        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt { path, source })
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StorageError> {
        let path = self.dir.join(file);
        let content = serde_json::to_string_pretty(value).map_err(|source| StorageError::Corrupt {
            path: path.clone(),
            source,
        })?;
        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::WriteFailed {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, content).map_err(|source| StorageError::WriteFailed { path, source })
    }
}

impl StateRepository for JsonFileRepository {
    fn load_streak(&self) -> Result<StreakState, StorageError> {
        self.read(STREAK_FILE)
    }

    fn save_streak(&self, state: &StreakState) -> Result<(), StorageError> {
        self.write(STREAK_FILE, state)
    }

    fn load_multipliers(&self) -> Result<MultiplierState, StorageError> {
        self.read(MULTIPLIERS_FILE)
    }

    fn save_multipliers(&self, state: &MultiplierState) -> Result<(), StorageError> {
        self.write(MULTIPLIERS_FILE, state)
    }
}
