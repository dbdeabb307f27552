//! Configuration and persisted state of one data directory.

use std::path::{Path, PathBuf};

use super::config::CONFIG_FILE;
use super::{data_dir, EngineConfig, JsonFileRepository, StateRepository};
use crate::error::Result;
use crate::multipliers::MultiplierState;
use crate::streak::StreakTracker;

/// Loaded config plus the state repository next to it.
#[derive(Debug, Clone)]
pub struct Workspace {
    dir: PathBuf,
    config: EngineConfig,
    repo: JsonFileRepository,
}

impl Workspace {
    /// Open the user's data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// config file exists but cannot be read.
    pub fn open() -> Result<Self> {
        Self::open_at(data_dir()?)
    }

    /// Open `dir`, writing a default config when none exists.
    ///
    /// # Errors
    ///
    /// See [`Workspace::open`].
    pub fn open_at(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        let config = EngineConfig::load_from(&dir.join(CONFIG_FILE))?;
        let repo = JsonFileRepository::new(dir.clone());
        Ok(Self { dir, config, repo })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn repo(&self) -> &JsonFileRepository {
        &self.repo
    }

    pub fn multipliers(&self) -> Result<MultiplierState> {
        Ok(self.repo.load_multipliers()?)
    }

    pub fn save_multipliers(&self, state: &MultiplierState) -> Result<()> {
        Ok(self.repo.save_multipliers(state)?)
    }

    /// Tracker over the stored streak, exactly as saved.
    ///
    /// Scoring should go through [`StreakTracker::multiplier_at`] so that a
    /// missed day is not rewarded.
    pub fn streak_tracker(&self) -> Result<StreakTracker> {
        let state = self.repo.load_streak()?;
        Ok(StreakTracker::from_state(
            state,
            self.config.streak.clone(),
            self.config.day_clock(),
        ))
    }

    pub fn save_streak(&self, tracker: &StreakTracker) -> Result<()> {
        Ok(self.repo.save_streak(tracker.state())?)
    }
}
