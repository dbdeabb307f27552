//! Daily activity streak state machine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::messages::{message_for, multiplier_percent};
use super::policy::{Milestone, MilestoneProgress, StreakPolicy};
use crate::clock::DayClock;

/// One recorded active day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakDay {
    pub day: NaiveDate,
    pub streak: u32,
}

/// Persisted streak counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_active_days: u32,
    pub last_active_day: Option<NaiveDate>,
    #[serde(default)]
    pub history: Vec<StreakDay>,
}

/// What a call to [`StreakTracker::record_activity`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "transition")]
pub enum StreakTransition {
    /// Today was already counted
    AlreadyRecorded,
    /// First ever active day
    Started,
    /// Active the day after the last active day
    Extended,
    /// Gap of two or more days; the streak restarted at 1
    Reset { previous: u32 },
    /// `now` fell on a day before the last active day; nothing changed
    ClockSkew,
}

impl StreakTransition {
    /// Whether the state changed.
    pub fn counted(&self) -> bool {
        matches!(self, Self::Started | Self::Extended | Self::Reset { .. })
    }
}

/// Read-only snapshot for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakInfo {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_active_days: u32,
    pub last_active_day: Option<NaiveDate>,
    pub multiplier: f64,
    pub multiplier_percent: String,
    pub next_milestone: Option<MilestoneProgress>,
    pub message: String,
}

/// Owns the streak state and is its only writer.
#[derive(Debug, Clone)]
pub struct StreakTracker {
    state: StreakState,
    policy: StreakPolicy,
    clock: DayClock,
}

impl StreakTracker {
    /// Fresh tracker with no recorded activity.
    pub fn new(policy: StreakPolicy, clock: DayClock) -> Self {
        Self::from_state(StreakState::default(), policy, clock)
    }

    /// Resume from persisted state.
    pub fn from_state(state: StreakState, policy: StreakPolicy, clock: DayClock) -> Self {
        Self {
            state,
            policy,
            clock,
        }
    }

    pub fn state(&self) -> &StreakState {
        &self.state
    }

    pub fn into_state(self) -> StreakState {
        self.state
    }

    pub fn policy(&self) -> &StreakPolicy {
        &self.policy
    }

    pub fn clock(&self) -> &DayClock {
        &self.clock
    }

    pub fn current_streak(&self) -> u32 {
        self.state.current_streak
    }

    /// Count the local day of `now_ms` as active.
    ///
    /// Idempotent within a day. Consecutive days extend the streak, a gap of
    /// two or more days restarts it at 1.
    pub fn record_activity(&mut self, now_ms: i64) -> StreakTransition {
        let today = self.clock.day_key(now_ms);
        let state = &mut self.state;

        let transition = match state.last_active_day {
            None => {
                state.current_streak = 1;
                state.total_active_days = 1;
                StreakTransition::Started
            }
            Some(last) => match DayClock::days_between(last, today) {
                0 => return StreakTransition::AlreadyRecorded,
                gap if gap < 0 => {
                    warn!(%last, %today, "activity recorded before last active day, ignoring");
                    return StreakTransition::ClockSkew;
                }
                1 => {
                    state.current_streak = state.current_streak.saturating_add(1);
                    state.total_active_days = state.total_active_days.saturating_add(1);
                    StreakTransition::Extended
                }
                _ => {
                    let previous = state.current_streak;
                    state.current_streak = 1;
                    state.total_active_days = state.total_active_days.saturating_add(1);
                    StreakTransition::Reset { previous }
                }
            },
        };

        state.longest_streak = state.longest_streak.max(state.current_streak);
        state.last_active_day = Some(today);
        state.history.push(StreakDay {
            day: today,
            streak: state.current_streak,
        });
        let limit = self.policy.history_limit;
        if state.history.len() > limit {
            let excess = state.history.len() - limit;
            state.history.drain(..excess);
        }

        info!(
            day = %today,
            streak = state.current_streak,
            longest = state.longest_streak,
            ?transition,
            "streak updated"
        );
        transition
    }

    /// Drop the current streak to zero once a day has been missed.
    ///
    /// Longest streak and total active days are kept. Returns whether the
    /// state changed.
    pub fn expire_stale(&mut self, now_ms: i64) -> bool {
        if !self.is_stale(now_ms) {
            return false;
        }
        debug!(
            last = ?self.state.last_active_day,
            streak = self.state.current_streak,
            "streak expired"
        );
        self.state.current_streak = 0;
        true
    }

    /// Whether a day was missed between the last active day and `now_ms`
    /// while a streak is still counted.
    pub fn is_stale(&self, now_ms: i64) -> bool {
        let Some(last) = self.state.last_active_day else {
            return false;
        };
        let today = self.clock.day_key(now_ms);
        DayClock::days_between(last, today) > 1 && self.state.current_streak > 0
    }

    /// Current streak multiplier, as stored.
    pub fn multiplier(&self) -> f64 {
        self.policy.multiplier(self.state.current_streak)
    }

    /// Multiplier the streak earns at `now_ms`. A missed day counts as a
    /// broken streak; the state is left as is.
    pub fn multiplier_at(&self, now_ms: i64) -> f64 {
        if self.is_stale(now_ms) {
            self.policy.multiplier(0)
        } else {
            self.multiplier()
        }
    }

    /// Milestone hit exactly by the current streak.
    pub fn milestone_reached(&self) -> Option<&Milestone> {
        self.policy.check_milestone(self.state.current_streak)
    }

    pub fn info(&self) -> StreakInfo {
        let streak = self.state.current_streak;
        let multiplier = self.multiplier();
        StreakInfo {
            current_streak: streak,
            longest_streak: self.state.longest_streak,
            total_active_days: self.state.total_active_days,
            last_active_day: self.state.last_active_day,
            multiplier,
            multiplier_percent: multiplier_percent(multiplier),
            next_milestone: self.policy.next_milestone(streak),
            message: message_for(streak, &self.policy),
        }
    }
}

impl Default for StreakTracker {
    fn default() -> Self {
        Self::new(StreakPolicy::default(), DayClock::utc())
    }
}
