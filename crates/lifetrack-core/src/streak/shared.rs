//! Thread-safe handle around a [`StreakTracker`].
//!
//! `record_activity` is a read-modify-write on the last active day; two
//! unsynchronized writers can lose an update. Every mutation goes through
//! one mutex here.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::tracker::{StreakInfo, StreakState, StreakTracker, StreakTransition};

/// Cloneable, shareable streak tracker.
#[derive(Debug, Clone, Default)]
pub struct SharedStreakTracker {
    inner: Arc<Mutex<StreakTracker>>,
}

impl SharedStreakTracker {
    pub fn new(tracker: StreakTracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    // Updates are plain counter assignments; a poisoned lock still holds a
    // consistent state.
    fn lock(&self) -> MutexGuard<'_, StreakTracker> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record_activity(&self, now_ms: i64) -> StreakTransition {
        self.lock().record_activity(now_ms)
    }

    pub fn expire_stale(&self, now_ms: i64) -> bool {
        self.lock().expire_stale(now_ms)
    }

    pub fn multiplier(&self) -> f64 {
        self.lock().multiplier()
    }

    pub fn info(&self) -> StreakInfo {
        self.lock().info()
    }

    /// Copy of the current state, e.g. for persisting.
    pub fn snapshot(&self) -> StreakState {
        self.lock().state().clone()
    }

    /// Run `f` with exclusive access to the tracker.
    pub fn with<R>(&self, f: impl FnOnce(&mut StreakTracker) -> R) -> R {
        f(&mut self.lock())
    }
}
