//! Side-by-side columns for overlapping intervals within one day.

use chrono::NaiveDate;
use tracing::debug;

use super::packer::{pack_assignments, LayoutAssignment};
use crate::clock::DayClock;
use crate::interval::{Interval, Span};

/// Assign display columns to same-day intervals.
///
/// An interval shares a column with the previous one when it starts at or
/// after that one's effective end, so touching intervals stack and
/// zero-length intervals free their column immediately. Intervals crossing
/// midnight should be cut with [`clip_to_day`] first.
pub fn layout_columns(intervals: &[Interval], now_ms: i64) -> LayoutAssignment {
    let layout = pack_assignments(
        intervals,
        |iv| iv.id.as_str(),
        |iv| iv.start_at,
        |iv| iv.effective_end(now_ms),
    );
    debug!(
        intervals = intervals.len(),
        columns = layout.track_count,
        "column layout"
    );
    layout
}

/// Cut intervals down to the local calendar day `day`.
///
/// Intervals that do not touch the day are dropped. The clipped copies are
/// closed (`active = false`) so their end stays at the clipped end. A
/// zero-length record lying on the day is kept.
pub fn clip_to_day(intervals: &[Interval], day: NaiveDate, clock: &DayClock, now_ms: i64) -> Vec<Interval> {
    let day_span = Span::day(clock.start_of_day(day));
    intervals
        .iter()
        .filter_map(|iv| {
            let span = iv.effective_span(now_ms);
            let on_day = if span.is_empty() {
                (span.start >= day_span.start && span.start < day_span.end).then_some(span)
            } else {
                span.intersect(&day_span)
            };
            let clipped = on_day?;
            let mut copy = iv.clone();
            copy.start_at = clipped.start;
            copy.end_at = clipped.end;
            copy.active = false;
            Some(copy)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{MS_PER_DAY, MS_PER_MINUTE};
    use crate::interval::IntervalKind;

    const DAY0: i64 = 1_767_225_600_000; // 2026-01-01T00:00:00Z

    fn at(minute: i64) -> i64 {
        DAY0 + minute * MS_PER_MINUTE
    }

    fn ev(id: &str, from: i64, to: i64) -> Interval {
        Interval::new(id, at(from), at(to), IntervalKind::Event)
    }

    fn assert_no_overlap(intervals: &[Interval], layout: &LayoutAssignment, now_ms: i64) {
        for (i, a) in intervals.iter().enumerate() {
            for b in &intervals[i + 1..] {
                if layout.index_of(&a.id) == layout.index_of(&b.id) {
                    let sa = a.effective_span(now_ms);
                    let sb = b.effective_span(now_ms);
                    assert!(
                        sa.end <= sb.start || sb.end <= sa.start,
                        "{} and {} overlap in one column",
                        a.id,
                        b.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_overlapping_intervals_get_separate_columns() {
        let intervals = vec![ev("a", 60, 120), ev("b", 90, 150), ev("c", 100, 110)];
        let layout = layout_columns(&intervals, 0);
        assert_eq!(layout.track_count, 3);
        assert_eq!(layout.index_of("a"), Some(0));
        assert_eq!(layout.index_of("b"), Some(1));
        assert_eq!(layout.index_of("c"), Some(2));
        assert_no_overlap(&intervals, &layout, 0);
    }

    #[test]
    fn test_touching_intervals_share_a_column() {
        let intervals = vec![ev("a", 60, 120), ev("b", 120, 180)];
        let layout = layout_columns(&intervals, 0);
        assert_eq!(layout.track_count, 1);
        assert_eq!(layout.index_of("b"), Some(0));
    }

    #[test]
    fn test_zero_length_interval_frees_column() {
        let intervals = vec![ev("point", 60, 60), ev("next", 60, 90)];
        let layout = layout_columns(&intervals, 0);
        assert_eq!(layout.track_count, 1);
    }

    #[test]
    fn test_running_episode_occupies_until_now() {
        let episode = Interval::new("ep", at(60), at(60), IntervalKind::Episode).running();
        let intervals = vec![episode, ev("later", 90, 100)];
        let layout = layout_columns(&intervals, at(120));
        assert_eq!(layout.track_count, 2);
        // before "now" passes 90 minutes they fit in one column
        let layout = layout_columns(&intervals, at(80));
        assert_eq!(layout.track_count, 1);
    }

    #[test]
    fn test_deterministic_for_fixed_input() {
        let intervals = vec![ev("a", 0, 30), ev("b", 0, 30), ev("c", 10, 50), ev("d", 30, 40)];
        let first = layout_columns(&intervals, 0);
        for _ in 0..5 {
            assert_eq!(layout_columns(&intervals, 0), first);
        }
        assert_no_overlap(&intervals, &first, 0);
    }

    #[test]
    fn test_clip_to_day() {
        let clock = DayClock::utc();
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let overnight = Interval::new("night", at(-120), at(60), IntervalKind::Episode);
        let tomorrow = ev("tomorrow", 24 * 60 + 10, 24 * 60 + 20);
        let marker = Interval::log("m", at(30));

        let clipped = clip_to_day(&[overnight, tomorrow, marker], day, &clock, 0);
        assert_eq!(clipped.len(), 2);
        assert_eq!(clipped[0].start_at, DAY0);
        assert_eq!(clipped[0].end_at, at(60));
        assert_eq!(clipped[1].id, "m");
    }

    #[test]
    fn test_clip_to_day_closes_running_episode() {
        let clock = DayClock::utc();
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let running = Interval::new("ep", at(23 * 60), at(23 * 60), IntervalKind::Episode).running();
        let now = DAY0 + MS_PER_DAY + 60 * MS_PER_MINUTE;
        let clipped = clip_to_day(&[running], day, &clock, now);
        assert_eq!(clipped[0].end_at, DAY0 + MS_PER_DAY);
        assert!(!clipped[0].active);
    }
}
