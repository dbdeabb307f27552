//! Point scoring for tracked activities.
//!
//! Points are effort-rate × time:
//!
//! ```text
//! points = importance × difficulty × (minutes / 60) × goal × project × streak
//! ```
//!
//! where importance and difficulty are clamped to [1, 10] (default 5).
//! Scoring is pure. Recording today's activity for the streak is a separate,
//! explicit step ([`ScoringEngine::score_and_record_activity`]) so report and
//! dashboard recomputation over old data never moves the live streak.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::interval::{Interval, DEFAULT_SCALAR, MAX_SCALAR, MIN_SCALAR};
use crate::multipliers::MultiplierState;
use crate::streak::{SharedStreakTracker, StreakTracker, StreakTransition};

/// `clamp(importance) × clamp(difficulty)`, in [1, 100].
///
/// Missing values default to 5; a non-finite value yields 0.
pub fn base_points(importance: Option<f64>, difficulty: Option<f64>) -> f64 {
    let i = importance.unwrap_or(DEFAULT_SCALAR);
    let d = difficulty.unwrap_or(DEFAULT_SCALAR);
    if !i.is_finite() || !d.is_finite() {
        return 0.0;
    }
    i.clamp(MIN_SCALAR, MAX_SCALAR) * d.clamp(MIN_SCALAR, MAX_SCALAR)
}

/// Points for `minutes` of work at `base` points per hour.
///
/// Non-finite `base` or `minutes` score 0, negative minutes count as 0, and
/// a non-finite multiplier counts as 1. Pass `1.0` as `streak_multiplier`
/// to leave the streak out.
pub fn points_for_minutes(base: f64, minutes: f64, multiplier: f64, streak_multiplier: f64) -> f64 {
    if !base.is_finite() || !minutes.is_finite() {
        return 0.0;
    }
    let multiplier = if multiplier.is_finite() { multiplier } else { 1.0 };
    let streak = if streak_multiplier.is_finite() {
        streak_multiplier
    } else {
        1.0
    };
    base * minutes.max(0.0) / 60.0 * multiplier * streak
}

/// Format a point value with fixed precision; non-finite values show as 0.
pub fn format_xp(value: f64, precision: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{value:.precision$}")
}

/// Best-known duration of a record in minutes.
///
/// Uses the end when there is one, the running time when the record is
/// active, then the planned estimate, else 0.
pub fn resolve_duration_minutes(
    start_at: i64,
    end_at: Option<i64>,
    active: bool,
    estimate_minutes: Option<f64>,
    now_ms: i64,
) -> f64 {
    let span_minutes = |end: i64| (end.saturating_sub(start_at)).max(0) as f64 / 60_000.0;
    if let Some(end) = end_at {
        return span_minutes(end);
    }
    if active {
        return span_minutes(now_ms);
    }
    match estimate_minutes {
        Some(est) if est.is_finite() => est.max(0.0),
        _ => 0.0,
    }
}

/// How a score was put together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub minutes: i64,
    pub goal_multiplier: f64,
    pub project_multiplier: f64,
    pub streak_multiplier: f64,
    pub points: f64,
}

impl ScoreBreakdown {
    /// Product of all multipliers, as shown next to a score ("3.2×").
    pub fn total_multiplier(&self) -> f64 {
        self.goal_multiplier * self.project_multiplier * self.streak_multiplier
    }
}

/// Result of scoring a user action that also counts toward the streak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredActivity {
    pub points: f64,
    /// `None` when the activity did not qualify for the streak
    pub transition: Option<StreakTransition>,
}

/// Something that can count a day as active.
pub trait ActivityRecorder {
    fn record_activity(&mut self, now_ms: i64) -> StreakTransition;
}

impl ActivityRecorder for StreakTracker {
    fn record_activity(&mut self, now_ms: i64) -> StreakTransition {
        StreakTracker::record_activity(self, now_ms)
    }
}

impl ActivityRecorder for SharedStreakTracker {
    fn record_activity(&mut self, now_ms: i64) -> StreakTransition {
        SharedStreakTracker::record_activity(self, now_ms)
    }
}

/// Scores intervals against one multiplier snapshot and streak multiplier.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine<'a> {
    multipliers: &'a MultiplierState,
    streak_multiplier: f64,
    now_ms: i64,
}

impl<'a> ScoringEngine<'a> {
    /// `now_ms` is the instant running episodes are scored up to.
    pub fn new(multipliers: &'a MultiplierState, streak_multiplier: f64, now_ms: i64) -> Self {
        let streak_multiplier = if streak_multiplier.is_finite() && streak_multiplier > 0.0 {
            streak_multiplier
        } else {
            1.0
        };
        Self {
            multipliers,
            streak_multiplier,
            now_ms,
        }
    }

    /// Engine using the multiplier the tracker's streak earns at `now_ms`.
    ///
    /// A streak whose last active day is more than one day back scores as
    /// broken even when the stored state was never expired.
    pub fn from_tracker(
        multipliers: &'a MultiplierState,
        tracker: &StreakTracker,
        now_ms: i64,
    ) -> Self {
        Self::new(multipliers, tracker.multiplier_at(now_ms), now_ms)
    }

    /// Engine that leaves the streak out entirely.
    pub fn without_streak(multipliers: &'a MultiplierState, now_ms: i64) -> Self {
        Self::new(multipliers, 1.0, now_ms)
    }

    pub fn streak_multiplier(&self) -> f64 {
        self.streak_multiplier
    }

    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    pub fn multipliers(&self) -> &'a MultiplierState {
        self.multipliers
    }

    /// [`points_for_minutes`] with this engine's streak multiplier.
    pub fn points_for_minutes(&self, base: f64, minutes: f64, multiplier: f64, include_streak: bool) -> f64 {
        let streak = if include_streak {
            self.streak_multiplier
        } else {
            1.0
        };
        points_for_minutes(base, minutes, multiplier, streak)
    }

    /// Goal × project, without the streak.
    pub fn multiplier_for(&self, goal: Option<&str>, project: Option<&str>) -> f64 {
        self.multipliers.combined(goal, project)
    }

    /// Goal × project × streak.
    pub fn total_multiplier_for(&self, goal: Option<&str>, project: Option<&str>) -> f64 {
        self.multiplier_for(goal, project) * self.streak_multiplier
    }

    /// Whole minutes of `interval` inside the optional clip bounds.
    pub fn interval_minutes(&self, interval: &Interval, clip_start: Option<i64>, clip_end: Option<i64>) -> i64 {
        interval
            .clipped_span(self.now_ms, clip_start, clip_end)
            .minutes()
    }

    /// Points for `minutes` of `interval`'s activity.
    ///
    /// Logs always score 0: they are measurements, not effort.
    pub fn score_minutes(&self, interval: &Interval, minutes: i64) -> f64 {
        if interval.kind.is_point_in_time() {
            return 0.0;
        }
        let base = base_points(interval.importance, interval.difficulty);
        if base <= 0.0 {
            debug!(id = %interval.id, "unscorable importance/difficulty, scoring 0");
            return 0.0;
        }
        let multiplier = self.multiplier_for(interval.goal.as_deref(), interval.project.as_deref());
        points_for_minutes(base, minutes as f64, multiplier, self.streak_multiplier)
    }

    /// Points for the part of `interval` inside the optional clip bounds.
    pub fn score_interval(&self, interval: &Interval, clip_start: Option<i64>, clip_end: Option<i64>) -> f64 {
        self.score_minutes(interval, self.interval_minutes(interval, clip_start, clip_end))
    }

    /// Itemized version of [`Self::score_interval`].
    pub fn breakdown(&self, interval: &Interval, clip_start: Option<i64>, clip_end: Option<i64>) -> ScoreBreakdown {
        let base = if interval.kind.is_point_in_time() {
            0.0
        } else {
            base_points(interval.importance, interval.difficulty)
        };
        let minutes = self.interval_minutes(interval, clip_start, clip_end);
        ScoreBreakdown {
            base,
            minutes,
            goal_multiplier: self.multipliers.goal_multiplier(interval.goal.as_deref()),
            project_multiplier: self.multipliers.project_multiplier(interval.project.as_deref()),
            streak_multiplier: self.streak_multiplier,
            points: self.score_minutes(interval, minutes),
        }
    }

    /// Score a just-performed user action and count today toward the streak.
    ///
    /// Only activities that actually earn points count. Use this from the
    /// place a user logs or completes something, never from report loops.
    pub fn score_and_record_activity<R: ActivityRecorder>(
        &self,
        interval: &Interval,
        recorder: &mut R,
    ) -> ScoredActivity {
        let points = self.score_interval(interval, None, None);
        let transition = (points > 0.0).then(|| recorder.record_activity(self.now_ms));
        ScoredActivity { points, transition }
    }
}

/// Goal × project × streak for display, straight from a snapshot.
pub fn total_multiplier_for(
    goal: Option<&str>,
    project: Option<&str>,
    multipliers: &MultiplierState,
    streak_multiplier: f64,
) -> f64 {
    ScoringEngine::new(multipliers, streak_multiplier, 0).total_multiplier_for(goal, project)
}
