//! Per-day minute and point totals over a reporting window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{round_minutes, DayClock, MS_PER_DAY};
use crate::interval::{Interval, Span};
use crate::scoring::ScoringEngine;

/// What a range report should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOptions {
    /// Score each bucket's minutes
    pub include_points: bool,
    /// Count tracker logs (they usually have no duration)
    pub include_logs: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            include_points: true,
            include_logs: false,
        }
    }
}

/// Totals for one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    pub day: NaiveDate,
    pub start_ms: i64,
    pub end_ms: i64,
    pub minutes: i64,
    pub points: f64,
    /// Intervals that overlapped this day inside the window
    pub intervals: usize,
}

impl DayBucket {
    fn empty(day: NaiveDate, clock: &DayClock) -> Self {
        let span = Span::day(clock.start_of_day(day));
        Self {
            day,
            start_ms: span.start,
            end_ms: span.end,
            minutes: 0,
            points: 0.0,
            intervals: 0,
        }
    }

    fn span(&self) -> Span {
        Span::new(self.start_ms, self.end_ms)
    }
}

/// Day buckets covering a window, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeReport {
    pub window: Span,
    pub buckets: Vec<DayBucket>,
    pub total_minutes: i64,
    pub total_points: f64,
}

impl RangeReport {
    pub fn bucket(&self, day: NaiveDate) -> Option<&DayBucket> {
        self.buckets.iter().find(|b| b.day == day)
    }

    /// Minutes per day, for heatmaps and charts.
    pub fn minutes_series(&self) -> Vec<i64> {
        self.buckets.iter().map(|b| b.minutes).collect()
    }

    /// Points per day, for heatmaps and charts.
    pub fn points_series(&self) -> Vec<f64> {
        self.buckets.iter().map(|b| b.points).collect()
    }
}

/// Most local days one range report holds, about ten years.
///
/// Reports allocate a bucket per day up front, so longer windows are cut
/// short at this many days from their start.
pub const MAX_WINDOW_DAYS: u32 = 3660;

fn window_len_ms(day_count: u32) -> i64 {
    i64::from(day_count.min(MAX_WINDOW_DAYS)) * MS_PER_DAY
}

/// Window covering `day_count` whole local days starting at `first_day`,
/// at most [`MAX_WINDOW_DAYS`].
pub fn days_window(clock: &DayClock, first_day: NaiveDate, day_count: u32) -> Span {
    let start = clock.start_of_day(first_day);
    Span::new(start, start.saturating_add(window_len_ms(day_count)))
}

/// Window of the last `day_count` local days, today included, at most
/// [`MAX_WINDOW_DAYS`].
pub fn trailing_days_window(clock: &DayClock, now_ms: i64, day_count: u32) -> Span {
    let today_end = Span::day(clock.day_start_ms(now_ms)).end;
    Span::new(today_end.saturating_sub(window_len_ms(day_count)), today_end)
}

/// Aggregate `intervals` into local day buckets over `window`.
///
/// Each interval is clipped to the window, then to every day it touches.
/// Minutes are rounded cumulatively from the clipped start, so the buckets
/// an interval contributes to always add up to exactly its rounded clipped
/// duration. Points are scored from each bucket's minutes so long sessions
/// crossing midnight are split the same way. An empty or inverted window
/// yields no buckets. A window spanning more than [`MAX_WINDOW_DAYS`] local
/// days is cut at that many days and the report's `window` says so.
pub fn aggregate_range(
    intervals: &[Interval],
    window: Span,
    clock: &DayClock,
    engine: &ScoringEngine<'_>,
    options: AggregateOptions,
) -> RangeReport {
    let mut report = RangeReport {
        window,
        buckets: Vec::new(),
        total_minutes: 0,
        total_points: 0.0,
    };
    if window.is_empty() {
        return report;
    }

    let limit = clock.day_start_ms(window.start).saturating_add(window_len_ms(MAX_WINDOW_DAYS));
    if window.end > limit {
        warn!(
            start = window.start,
            end = window.end,
            max_days = MAX_WINDOW_DAYS,
            "report window too long, truncating"
        );
        report.window = Span::new(window.start, limit);
    }
    let window = report.window;

    let first_day = clock.day_key(window.start);
    let last_day = clock.day_key(window.end - 1);
    report.buckets = first_day
        .iter_days()
        .take_while(|day| *day <= last_day)
        .map(|day| DayBucket::empty(day, clock))
        .collect();

    for interval in intervals {
        if interval.kind.is_point_in_time() && !options.include_logs {
            continue;
        }
        let Some(clipped) = interval.effective_span(engine.now_ms()).intersect(&window) else {
            continue;
        };

        let offset = DayClock::days_between(first_day, clock.day_key(clipped.start));
        let Ok(first_bucket) = usize::try_from(offset) else {
            debug!(id = %interval.id, "clipped start before first bucket, skipping");
            continue;
        };

        for bucket in report.buckets.iter_mut().skip(first_bucket) {
            let Some(segment) = clipped.intersect(&bucket.span()) else {
                break;
            };
            let minutes = round_minutes(segment.end - clipped.start)
                - round_minutes(segment.start - clipped.start);
            bucket.minutes += minutes;
            if options.include_points {
                bucket.points += engine.score_minutes(interval, minutes);
            }
            bucket.intervals += 1;
        }
    }

    report.total_minutes = report.buckets.iter().map(|b| b.minutes).sum();
    report.total_points = report.buckets.iter().map(|b| b.points).sum();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{MS_PER_DAY, MS_PER_MINUTE};
    use crate::interval::IntervalKind;
    use crate::multipliers::MultiplierState;

    const DAY0: i64 = 1_767_225_600_000; // 2026-01-01T00:00:00Z

    fn at(minute: i64) -> i64 {
        DAY0 + minute * MS_PER_MINUTE
    }

    fn task(id: &str, from: i64, to: i64) -> Interval {
        Interval::new(id, at(from), at(to), IntervalKind::Task)
    }

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn run(intervals: &[Interval], window: Span) -> RangeReport {
        let state = MultiplierState::new();
        let engine = ScoringEngine::without_streak(&state, DAY0);
        aggregate_range(intervals, window, &DayClock::utc(), &engine, AggregateOptions::default())
    }

    #[test]
    fn test_interval_inside_one_bucket() {
        let window = days_window(&DayClock::utc(), jan(1), 3);
        let report = run(&[task("a", 24 * 60 + 60, 24 * 60 + 150)], window);
        assert_eq!(report.minutes_series(), vec![0, 90, 0]);
        assert_eq!(report.bucket(jan(2)).unwrap().points, 37.5);
        assert_eq!(report.bucket(jan(2)).unwrap().intervals, 1);
    }

    #[test]
    fn test_interval_split_across_midnight() {
        let window = days_window(&DayClock::utc(), jan(1), 2);
        let report = run(&[task("night", 23 * 60, 25 * 60 + 30)], window);
        assert_eq!(report.minutes_series(), vec![60, 90]);
        assert_eq!(report.total_minutes, 150);
        assert_eq!(report.total_points, 25.0 * 150.0 / 60.0);
    }

    #[test]
    fn test_window_clips_interval() {
        let window = Span::new(at(60), at(120));
        let report = run(&[task("a", 0, 600)], window);
        assert_eq!(report.buckets.len(), 1);
        assert_eq!(report.total_minutes, 60);
    }

    #[test]
    fn test_sub_minute_segments_do_not_double_count() {
        // 30s before and 30s after midnight: one rounded minute in total
        let start = DAY0 + MS_PER_DAY - 30_000;
        let iv = Interval::new("tiny", start, start + 60_000, IntervalKind::Task);
        let window = days_window(&DayClock::utc(), jan(1), 2);
        let report = run(&[iv], window);
        assert_eq!(report.total_minutes, 1);
    }

    #[test]
    fn test_empty_window() {
        let report = run(&[task("a", 0, 60)], Span::new(at(60), at(60)));
        assert!(report.buckets.is_empty());
        assert_eq!(report.total_minutes, 0);
        assert_eq!(report.total_points, 0.0);

        let inverted = run(&[task("a", 0, 60)], Span::new(at(60), at(0)));
        assert!(inverted.buckets.is_empty());
    }

    #[test]
    fn test_logs_skipped_unless_requested() {
        let mut log = Interval::log("sleep-log", at(60));
        log.end_at = at(120);
        let window = days_window(&DayClock::utc(), jan(1), 1);
        assert_eq!(run(std::slice::from_ref(&log), window).total_minutes, 0);

        let state = MultiplierState::new();
        let engine = ScoringEngine::without_streak(&state, DAY0);
        let options = AggregateOptions {
            include_logs: true,
            ..Default::default()
        };
        let report = aggregate_range(&[log], window, &DayClock::utc(), &engine, options);
        assert_eq!(report.total_minutes, 60);
        assert_eq!(report.total_points, 0.0);
    }

    #[test]
    fn test_running_episode_counts_until_now() {
        let state = MultiplierState::new();
        let engine = ScoringEngine::without_streak(&state, at(90));
        let episode = Interval::new("ep", at(30), at(30), IntervalKind::Episode).running();
        let window = days_window(&DayClock::utc(), jan(1), 1);
        let report = aggregate_range(&[episode], window, &DayClock::utc(), &engine, AggregateOptions::default());
        assert_eq!(report.total_minutes, 60);
    }

    #[test]
    fn test_local_offset_buckets() {
        // UTC+2: 23:00Z on Jan 1 is 01:00 on Jan 2 locally
        let clock = DayClock::from_offset_minutes(120).unwrap();
        let state = MultiplierState::new();
        let engine = ScoringEngine::without_streak(&state, DAY0);
        let window = days_window(&clock, jan(1), 2);
        let report = aggregate_range(
            &[task("late", 23 * 60, 23 * 60 + 30)],
            window,
            &clock,
            &engine,
            AggregateOptions::default(),
        );
        assert_eq!(report.bucket(jan(2)).unwrap().minutes, 30);
        assert_eq!(report.bucket(jan(1)).unwrap().minutes, 0);
    }

    #[test]
    fn test_points_can_be_skipped() {
        let state = MultiplierState::new();
        let engine = ScoringEngine::without_streak(&state, DAY0);
        let options = AggregateOptions {
            include_points: false,
            ..Default::default()
        };
        let window = days_window(&DayClock::utc(), jan(1), 1);
        let report = aggregate_range(&[task("a", 0, 60)], window, &DayClock::utc(), &engine, options);
        assert_eq!(report.total_minutes, 60);
        assert_eq!(report.total_points, 0.0);
    }

    #[test]
    fn test_unbounded_window_is_capped() {
        let early = Interval::new("a", 0, 60 * MS_PER_MINUTE, IntervalKind::Task);
        let report = run(&[early], Span::new(0, i64::MAX));
        assert_eq!(report.buckets.len(), MAX_WINDOW_DAYS as usize);
        assert_eq!(report.window.end, i64::from(MAX_WINDOW_DAYS) * MS_PER_DAY);
        assert_eq!(report.total_minutes, 60);
    }

    #[test]
    fn test_window_helpers_cap_day_count() {
        let clock = DayClock::utc();
        let window = days_window(&clock, jan(1), u32::MAX);
        assert_eq!(window.len_ms(), i64::from(MAX_WINDOW_DAYS) * MS_PER_DAY);
        let trailing = trailing_days_window(&clock, DAY0, u32::MAX);
        assert_eq!(trailing.len_ms(), i64::from(MAX_WINDOW_DAYS) * MS_PER_DAY);
        assert_eq!(trailing.end, DAY0 + MS_PER_DAY);
    }

    #[test]
    fn test_trailing_days_window() {
        let clock = DayClock::utc();
        let window = trailing_days_window(&clock, at(600), 7);
        assert_eq!(window.end, DAY0 + MS_PER_DAY);
        assert_eq!(window.start, DAY0 - 6 * MS_PER_DAY);
    }
}
