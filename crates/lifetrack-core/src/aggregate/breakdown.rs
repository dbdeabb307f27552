//! Minute and point totals grouped by a label (category, goal, ...).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::interval::{Interval, Span};
use crate::scoring::ScoringEngine;

/// Label to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownKey {
    #[default]
    Category,
    Goal,
    Project,
    /// An interval counts once for every tag it carries
    Tag,
    Kind,
}

impl BreakdownKey {
    fn fallback(&self) -> &'static str {
        match self {
            BreakdownKey::Category => "Uncategorized",
            BreakdownKey::Goal => "No goal",
            BreakdownKey::Project => "No project",
            BreakdownKey::Tag => "Untagged",
            BreakdownKey::Kind => "",
        }
    }

    fn labels(&self, interval: &Interval) -> Vec<String> {
        let label = |value: Option<&String>| {
            value
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .unwrap_or(self.fallback())
                .to_string()
        };
        match self {
            BreakdownKey::Category => vec![label(interval.category.as_ref())],
            BreakdownKey::Goal => vec![label(interval.goal.as_ref())],
            BreakdownKey::Project => vec![label(interval.project.as_ref())],
            BreakdownKey::Kind => vec![interval.kind.as_str().to_string()],
            BreakdownKey::Tag if interval.tags.is_empty() => vec![self.fallback().to_string()],
            BreakdownKey::Tag => interval.tags.iter().cloned().collect(),
        }
    }
}

/// Which total orders the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownMetric {
    #[default]
    Minutes,
    Points,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownOptions {
    pub key: BreakdownKey,
    pub sort_by: BreakdownMetric,
    pub include_logs: bool,
    /// Keep only the top rows
    pub limit: Option<usize>,
}

impl Default for BreakdownOptions {
    fn default() -> Self {
        Self {
            key: BreakdownKey::Category,
            sort_by: BreakdownMetric::Minutes,
            include_logs: false,
            limit: Some(8),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub key: String,
    pub minutes: i64,
    pub points: f64,
}

/// Group the window-clipped minutes and points of `intervals` by label.
///
/// Rows whose sort metric is zero are dropped. Rows are ordered by the
/// chosen metric, largest first, ties by label.
pub fn breakdown(
    intervals: &[Interval],
    window: Span,
    engine: &ScoringEngine<'_>,
    options: &BreakdownOptions,
) -> Vec<BreakdownRow> {
    let mut totals: BTreeMap<String, (i64, f64)> = BTreeMap::new();
    if window.is_empty() {
        return Vec::new();
    }

    for interval in intervals {
        if interval.kind.is_point_in_time() && !options.include_logs {
            continue;
        }
        let minutes = engine.interval_minutes(interval, Some(window.start), Some(window.end));
        let points = engine.score_minutes(interval, minutes);
        for label in options.key.labels(interval) {
            let entry = totals.entry(label).or_insert((0, 0.0));
            entry.0 += minutes;
            entry.1 += points;
        }
    }

    let mut rows: Vec<BreakdownRow> = totals
        .into_iter()
        .map(|(key, (minutes, points))| BreakdownRow {
            key,
            minutes,
            points,
        })
        .filter(|row| match options.sort_by {
            BreakdownMetric::Minutes => row.minutes > 0,
            BreakdownMetric::Points => row.points > 0.0,
        })
        .collect();

    rows.sort_by(|a, b| {
        let order = match options.sort_by {
            BreakdownMetric::Minutes => b.minutes.cmp(&a.minutes),
            BreakdownMetric::Points => b.points.total_cmp(&a.points),
        };
        order.then_with(|| a.key.cmp(&b.key))
    });
    if let Some(limit) = options.limit {
        rows.truncate(limit);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MS_PER_MINUTE;
    use crate::interval::IntervalKind;
    use crate::multipliers::MultiplierState;

    fn iv(id: &str, minutes: i64) -> Interval {
        Interval::new(id, 0, minutes * MS_PER_MINUTE, IntervalKind::Task)
    }

    fn window() -> Span {
        Span::new(0, 24 * 60 * MS_PER_MINUTE)
    }

    #[test]
    fn test_groups_by_category_with_fallback() {
        let intervals = vec![
            iv("a", 60).with_category("Work"),
            iv("b", 30).with_category(" Work "),
            iv("c", 45),
            iv("d", 10).with_category("Health"),
        ];
        let state = MultiplierState::new();
        let engine = ScoringEngine::without_streak(&state, 0);
        let rows = breakdown(&intervals, window(), &engine, &BreakdownOptions::default());

        let keys: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Work", "Uncategorized", "Health"]);
        assert_eq!(rows[0].minutes, 90);
        assert_eq!(rows[0].points, 37.5);
    }

    #[test]
    fn test_tags_count_per_tag() {
        let intervals = vec![iv("a", 60).with_tag("deep").with_tag("code"), iv("b", 30)];
        let state = MultiplierState::new();
        let engine = ScoringEngine::without_streak(&state, 0);
        let options = BreakdownOptions {
            key: BreakdownKey::Tag,
            ..Default::default()
        };
        let rows = breakdown(&intervals, window(), &engine, &options);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].key, "code");
        assert_eq!(rows[1].key, "deep");
        assert_eq!(rows[2].key, "Untagged");
    }

    #[test]
    fn test_sort_by_points_uses_multipliers() {
        let mut state = MultiplierState::new();
        state.upsert_goal("boost", 4.0).unwrap();
        let intervals = vec![iv("long", 120).with_goal("plain"), iv("short", 60).with_goal("boost")];
        let engine = ScoringEngine::without_streak(&state, 0);
        let options = BreakdownOptions {
            key: BreakdownKey::Goal,
            sort_by: BreakdownMetric::Points,
            ..Default::default()
        };
        let rows = breakdown(&intervals, window(), &engine, &options);
        assert_eq!(rows[0].key, "boost");
        assert_eq!(rows[0].points, 100.0);
    }

    #[test]
    fn test_limit_and_zero_rows() {
        let intervals: Vec<_> = (0..12i64)
            .map(|i| iv(&format!("i{i}"), i).with_category(format!("c{i}")))
            .collect();
        let state = MultiplierState::new();
        let engine = ScoringEngine::without_streak(&state, 0);
        let rows = breakdown(&intervals, window(), &engine, &BreakdownOptions::default());
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].key, "c11");
        assert!(rows.iter().all(|r| r.minutes > 0));
    }
}
