//! # Lifetrack Core Library
//!
//! This library provides the temporal layout and scoring engine behind the
//! Lifetrack life-tracking app. Every operation is available through the
//! standalone CLI binary; UIs are thin layers over the same core library.
//!
//! ## Architecture
//!
//! - **Layout**: Greedy column packing for overlapping intervals and lane
//!   packing for point-in-time markers, sharing one packer
//! - **Aggregation**: Window clipping into local-day buckets for dashboards
//!   and heatmaps, plus label breakdowns
//! - **Scoring**: Importance × difficulty × hours × multipliers, with a
//!   compounding daily streak
//! - **Storage**: TOML-based configuration and a repository trait for
//!   streak/multiplier state
//!
//! ## Key Components
//!
//! - [`Interval`]: Activity record consumed by every engine
//! - [`ScoringEngine`]: Pure scorer over a multiplier snapshot
//! - [`StreakTracker`]: Daily streak state machine
//! - [`EngineConfig`]: Engine configuration management
//! - [`StateRepository`]: Trait for streak and multiplier persistence
//! - [`Workspace`]: Config and state of one data directory

pub mod aggregate;
pub mod clock;
pub mod error;
pub mod interval;
pub mod layout;
pub mod multipliers;
pub mod scoring;
pub mod storage;
pub mod streak;

pub use aggregate::{aggregate_range, breakdown, BreakdownKey, BreakdownRow, DayBucket, RangeReport};
pub use clock::DayClock;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use interval::{Interval, IntervalKind, Span};
pub use layout::{layout_columns, layout_day, layout_lanes, DayLayout, LayoutAssignment};
pub use multipliers::MultiplierState;
pub use scoring::{base_points, points_for_minutes, ScoreBreakdown, ScoringEngine};
pub use storage::{EngineConfig, InMemoryRepository, JsonFileRepository, StateRepository, Workspace};
pub use streak::{SharedStreakTracker, StreakInfo, StreakPolicy, StreakState, StreakTracker};
