//! Time-boxed activity records.
//!
//! An [`Interval`] is what the persistence layer hands the engine: an event,
//! task, tracker log or episode with start/end instants in epoch
//! milliseconds. The engine reads it and never mutates it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::clock::{round_minutes, DayClock, MS_PER_DAY};
use crate::error::ValidationError;

/// Importance/difficulty used when a record carries none.
pub const DEFAULT_SCALAR: f64 = 5.0;
/// Lowest accepted importance/difficulty after clamping.
pub const MIN_SCALAR: f64 = 1.0;
/// Highest accepted importance/difficulty after clamping.
pub const MAX_SCALAR: f64 = 10.0;

/// What kind of activity an interval records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalKind {
    /// Calendar event
    #[default]
    Event,
    /// Task worked on for a while
    Task,
    /// Point-in-time tracker measurement
    Log,
    /// Open-ended session that may still be running
    Episode,
}

impl IntervalKind {
    /// Point-in-time kinds score nothing and are laid out in lanes.
    pub fn is_point_in_time(&self) -> bool {
        matches!(self, IntervalKind::Log)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalKind::Event => "event",
            IntervalKind::Task => "task",
            IntervalKind::Log => "log",
            IntervalKind::Episode => "episode",
        }
    }
}

/// A half-open span `[start, end)` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Length in milliseconds, zero when inverted.
    pub fn len_ms(&self) -> i64 {
        self.end.saturating_sub(self.start).max(0)
    }

    /// Length rounded to whole minutes.
    pub fn minutes(&self) -> i64 {
        round_minutes(self.len_ms())
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Overlapping part of two spans, `None` if they do not share any time.
    pub fn intersect(&self, other: &Span) -> Option<Span> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (end > start).then_some(Span { start, end })
    }

    /// Span of the local calendar day `day_start_ms` begins.
    pub fn day(day_start_ms: i64) -> Self {
        Self {
            start: day_start_ms,
            end: day_start_ms.saturating_add(MS_PER_DAY),
        }
    }
}

/// A time-boxed activity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub id: String,
    pub start_at: i64,
    pub end_at: i64,
    #[serde(default)]
    pub kind: IntervalKind,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub importance: Option<f64>,
    #[serde(default)]
    pub difficulty: Option<f64>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    /// Dashboard grouping label
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Planned duration, used when a record has no usable end
    #[serde(default)]
    pub estimate_minutes: Option<f64>,
}

impl Interval {
    /// Create an interval with default importance/difficulty and no labels.
    pub fn new(id: impl Into<String>, start_at: i64, end_at: i64, kind: IntervalKind) -> Self {
        Self {
            id: id.into(),
            start_at,
            end_at,
            kind,
            active: false,
            importance: None,
            difficulty: None,
            goal: None,
            project: None,
            category: None,
            tags: BTreeSet::new(),
            estimate_minutes: None,
        }
    }

    /// A point-in-time tracker log at `at`.
    pub fn log(id: impl Into<String>, at: i64) -> Self {
        Self::new(id, at, at, IntervalKind::Log)
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = Some(importance);
        self
    }

    pub fn with_difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Mark the interval as currently running.
    pub fn running(mut self) -> Self {
        self.active = true;
        self
    }

    /// An active episode is still open; its stored end is meaningless.
    pub fn is_running_episode(&self) -> bool {
        self.kind == IntervalKind::Episode && self.active
    }

    /// End used for layout and scoring.
    ///
    /// Running episodes end at `now_ms`; every other record ends at `end_at`.
    /// The result is never earlier than `start_at`.
    pub fn effective_end(&self, now_ms: i64) -> i64 {
        let end = if self.is_running_episode() {
            now_ms
        } else {
            self.end_at
        };
        end.max(self.start_at)
    }

    /// `[start_at, effective_end)` as a span.
    pub fn effective_span(&self, now_ms: i64) -> Span {
        Span::new(self.start_at, self.effective_end(now_ms))
    }

    /// Effective span narrowed to optional clip bounds.
    ///
    /// The result may be empty (start == end) but is never inverted.
    pub fn clipped_span(&self, now_ms: i64, clip_start: Option<i64>, clip_end: Option<i64>) -> Span {
        let effective_end = self.effective_end(now_ms);
        let start = clip_start.map_or(self.start_at, |c| self.start_at.max(c));
        let end = clip_end.map_or(effective_end, |c| effective_end.min(c));
        Span::new(start, end.max(start))
    }

    /// Local calendar day the interval starts on.
    pub fn start_day(&self, clock: &DayClock) -> chrono::NaiveDate {
        clock.day_key(self.start_at)
    }

    /// Reject records a storage layer should not accept.
    ///
    /// The engine itself tolerates all of these; this is for collaborators
    /// that want to sanitize input at the boundary.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_running_episode() && self.end_at < self.start_at {
            return Err(ValidationError::InvalidTimeRange {
                start_at: self.start_at,
                end_at: self.end_at,
            });
        }
        for (field, value) in [("importance", self.importance), ("difficulty", self.difficulty)] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(ValidationError::InvalidValue {
                        field: field.to_string(),
                        message: format!("{v} is not a finite number"),
                    });
                }
            }
        }
        Ok(())
    }
}
