//! Reporting-window aggregation for dashboards and heatmaps.

mod breakdown;
mod range;

pub use breakdown::{breakdown, BreakdownKey, BreakdownMetric, BreakdownOptions, BreakdownRow};
pub use range::{
    aggregate_range, days_window, trailing_days_window, AggregateOptions, DayBucket, RangeReport,
    MAX_WINDOW_DAYS,
};
