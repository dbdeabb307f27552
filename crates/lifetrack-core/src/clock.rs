//! Local calendar-day arithmetic over epoch-millisecond instants.
//!
//! Everything in the engine that needs "which day is this" goes through a
//! [`DayClock`]. The clock is a fixed UTC offset so day buckets are always
//! exactly 24 hours long and results do not depend on the host timezone.

use chrono::{FixedOffset, NaiveDate, Offset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds per minute.
pub const MS_PER_MINUTE: i64 = 60_000;
/// Milliseconds per calendar day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Round a millisecond span to whole minutes, halves rounding up.
///
/// Negative spans round to zero.
pub fn round_minutes(span_ms: i64) -> i64 {
    if span_ms <= 0 {
        return 0;
    }
    span_ms.saturating_add(MS_PER_MINUTE / 2) / MS_PER_MINUTE
}

/// Maps instants to local calendar days under a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub struct DayClock {
    offset: FixedOffset,
}

impl DayClock {
    /// Clock on UTC days.
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Clock for an offset east of UTC in minutes (e.g. `-300` for UTC-5).
    ///
    /// Returns `None` when the offset is not within ±24h.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        let seconds = minutes.checked_mul(60)?;
        FixedOffset::east_opt(seconds).map(|offset| Self { offset })
    }

    /// The underlying offset.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Offset east of UTC in minutes.
    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    fn offset_ms(&self) -> i64 {
        i64::from(self.offset.local_minus_utc()) * 1000
    }

    /// Local calendar day containing `ms`.
    pub fn day_key(&self, ms: i64) -> NaiveDate {
        let local = ms.saturating_add(self.offset_ms());
        let days = local.div_euclid(MS_PER_DAY);
        match TimeDelta::try_days(days).and_then(|delta| epoch_day().checked_add_signed(delta)) {
            Some(day) => day,
            None if days < 0 => NaiveDate::MIN,
            None => NaiveDate::MAX,
        }
    }

    /// Epoch milliseconds of local midnight starting `day`.
    pub fn start_of_day(&self, day: NaiveDate) -> i64 {
        let days = day.signed_duration_since(epoch_day()).num_days();
        days.saturating_mul(MS_PER_DAY)
            .saturating_sub(self.offset_ms())
    }

    /// Local midnight at or before `ms`.
    pub fn day_start_ms(&self, ms: i64) -> i64 {
        self.start_of_day(self.day_key(ms))
    }

    /// Whole calendar days from `from` to `to` (negative if `to` is earlier).
    pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
        to.signed_duration_since(from).num_days()
    }
}

impl Default for DayClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl From<DayClock> for i32 {
    fn from(clock: DayClock) -> Self {
        clock.offset_minutes()
    }
}

impl TryFrom<i32> for DayClock {
    type Error = String;

    fn try_from(minutes: i32) -> Result<Self, Self::Error> {
        Self::from_offset_minutes(minutes)
            .ok_or_else(|| format!("utc offset out of range: {minutes} minutes"))
    }
}

fn epoch_day() -> NaiveDate {
    NaiveDate::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    fn ms(rfc3339: &str) -> i64 {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn test_utc_day_key() {
        let clock = DayClock::utc();
        assert_eq!(
            clock.day_key(ms("2026-03-01T23:59:59Z")),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        assert_eq!(
            clock.day_key(ms("2026-03-02T00:00:00Z")),
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
        );
    }

    #[test]
    fn test_negative_offset_shifts_day() {
        let clock = DayClock::from_offset_minutes(-300).unwrap();
        // 03:00 UTC is 22:00 the previous evening at UTC-5
        assert_eq!(
            clock.day_key(ms("2026-03-01T03:00:00Z")),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
    }

    #[test]
    fn test_start_of_day_matches_chrono() {
        let clock = DayClock::from_offset_minutes(120).unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 7, 14).unwrap();
        let expected = clock
            .offset()
            .from_local_datetime(&day.and_hms_opt(0, 0, 0).unwrap())
            .unwrap()
            .timestamp_millis();
        assert_eq!(clock.start_of_day(day), expected);
        assert_eq!(clock.day_key(expected), day);
        assert_eq!(clock.day_key(expected - 1), day.pred_opt().unwrap());
    }

    #[test]
    fn test_pre_epoch_instants() {
        let clock = DayClock::utc();
        assert_eq!(clock.day_key(-1), NaiveDate::from_ymd_opt(1969, 12, 31).unwrap());
        assert_eq!(clock.day_start_ms(-1), -MS_PER_DAY);
    }

    #[test]
    fn test_round_minutes() {
        assert_eq!(round_minutes(0), 0);
        assert_eq!(round_minutes(-90_000), 0);
        assert_eq!(round_minutes(29_999), 0);
        assert_eq!(round_minutes(30_000), 1);
        assert_eq!(round_minutes(90 * MS_PER_MINUTE), 90);
    }

    #[test]
    fn test_offset_out_of_range() {
        assert!(DayClock::from_offset_minutes(24 * 60).is_none());
        assert!(DayClock::from_offset_minutes(i32::MAX).is_none());
    }
}
