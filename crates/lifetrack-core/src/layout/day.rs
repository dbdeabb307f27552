//! Full layout for one calendar day: timed blocks in columns, tracker logs
//! in lanes beside them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::columns::{clip_to_day, layout_columns};
use super::lanes::layout_lanes;
use super::packer::LayoutAssignment;
use crate::clock::DayClock;
use crate::interval::Interval;

/// Minimum gap between stacked tracker logs, in minutes.
pub const DEFAULT_LOG_LANE_GAP_MINUTES: i64 = 12;

/// Columns and lanes for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLayout {
    pub day: NaiveDate,
    pub columns: LayoutAssignment,
    pub lanes: LayoutAssignment,
}

/// Lay out everything touching `day`.
///
/// Intervals are clipped to the day first; logs go to lanes spaced
/// `log_gap_minutes` apart, all other kinds to columns.
pub fn layout_day(
    intervals: &[Interval],
    day: NaiveDate,
    clock: &DayClock,
    now_ms: i64,
    log_gap_minutes: i64,
) -> DayLayout {
    let (logs, blocks): (Vec<Interval>, Vec<Interval>) = clip_to_day(intervals, day, clock, now_ms)
        .into_iter()
        .partition(|iv| iv.kind.is_point_in_time());
    DayLayout {
        day,
        columns: layout_columns(&blocks, now_ms),
        lanes: layout_lanes(&logs, log_gap_minutes),
    }
}
