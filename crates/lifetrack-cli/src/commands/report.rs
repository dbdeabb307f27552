use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use lifetrack_core::aggregate::{days_window, trailing_days_window, BreakdownMetric};
use lifetrack_core::{aggregate_range, breakdown, BreakdownKey, ScoringEngine, Workspace};

use super::{now_or, parse_day, print_json, read_intervals};

#[derive(Clone, Copy, ValueEnum)]
pub enum GroupBy {
    Category,
    Goal,
    Project,
    Tag,
    Kind,
}

impl From<GroupBy> for BreakdownKey {
    fn from(value: GroupBy) -> Self {
        match value {
            GroupBy::Category => BreakdownKey::Category,
            GroupBy::Goal => BreakdownKey::Goal,
            GroupBy::Project => BreakdownKey::Project,
            GroupBy::Tag => BreakdownKey::Tag,
            GroupBy::Kind => BreakdownKey::Kind,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortBy {
    Minutes,
    Points,
}

impl From<SortBy> for BreakdownMetric {
    fn from(value: SortBy) -> Self {
        match value {
            SortBy::Minutes => BreakdownMetric::Minutes,
            SortBy::Points => BreakdownMetric::Points,
        }
    }
}

/// Which days a report covers.
#[derive(Args)]
pub struct WindowArgs {
    /// JSON array of intervals
    file: PathBuf,
    /// First local day (YYYY-MM-DD); without it the window ends today
    #[arg(long, value_parser = parse_day)]
    from: Option<NaiveDate>,
    /// Number of days
    #[arg(long, default_value_t = 7)]
    days: u32,
    #[arg(long)]
    now: Option<i64>,
    /// Count tracker logs
    #[arg(long)]
    include_logs: bool,
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Minutes and points per day
    Range {
        #[command(flatten)]
        window: WindowArgs,
        /// Skip scoring
        #[arg(long)]
        no_points: bool,
    },
    /// Totals grouped by a label
    Breakdown {
        #[command(flatten)]
        window: WindowArgs,
        #[arg(long, value_enum, default_value_t = GroupBy::Category)]
        by: GroupBy,
        #[arg(long, value_enum, default_value_t = SortBy::Minutes)]
        sort: SortBy,
        /// Rows to keep, overriding the config (0 keeps all)
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub fn run(action: ReportAction) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = Workspace::open()?;
    let config = workspace.config();
    let multipliers = workspace.multipliers()?;
    let tracker = workspace.streak_tracker()?;
    let clock = config.day_clock();

    let resolve = |args: &WindowArgs| {
        let now = now_or(args.now);
        let window = match args.from {
            Some(first) => days_window(&clock, first, args.days),
            None => trailing_days_window(&clock, now, args.days),
        };
        (now, window)
    };

    match action {
        ReportAction::Range { window, no_points } => {
            let intervals = read_intervals(&window.file)?;
            let (now, span) = resolve(&window);
            let engine = ScoringEngine::from_tracker(&multipliers, &tracker, now);
            let mut options = config.aggregate_options();
            options.include_points = !no_points;
            options.include_logs |= window.include_logs;
            print_json(&aggregate_range(&intervals, span, &clock, &engine, options))?;
        }
        ReportAction::Breakdown {
            window,
            by,
            sort,
            limit,
        } => {
            let intervals = read_intervals(&window.file)?;
            let (now, span) = resolve(&window);
            let engine = ScoringEngine::from_tracker(&multipliers, &tracker, now);
            let mut options = config.breakdown_options(by.into(), sort.into());
            options.include_logs |= window.include_logs;
            if let Some(limit) = limit {
                options.limit = (limit > 0).then_some(limit);
            }
            print_json(&breakdown(&intervals, span, &engine, &options))?;
        }
    }
    Ok(())
}
