use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;
use lifetrack_core::{layout_columns, layout_day, layout_lanes, EngineConfig};

use super::{now_or, parse_day, print_json, read_intervals};

#[derive(Subcommand)]
pub enum LayoutAction {
    /// Columns and lanes for everything touching one day
    Day {
        /// JSON array of intervals
        file: PathBuf,
        /// Local day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_day)]
        date: NaiveDate,
        #[arg(long)]
        now: Option<i64>,
        /// Lane gap in minutes, overriding the config
        #[arg(long)]
        gap: Option<i64>,
    },
    /// Column assignment for intervals already clipped to one day
    Columns {
        file: PathBuf,
        #[arg(long)]
        now: Option<i64>,
    },
    /// Lane assignment for point-in-time markers
    Lanes {
        file: PathBuf,
        #[arg(long)]
        gap: Option<i64>,
    },
}

pub fn run(action: LayoutAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::load()?;

    match action {
        LayoutAction::Day {
            file,
            date,
            now,
            gap,
        } => {
            let intervals = read_intervals(&file)?;
            let gap = gap.unwrap_or(config.layout.log_lane_gap_minutes);
            let layout = layout_day(&intervals, date, &config.day_clock(), now_or(now), gap);
            print_json(&layout)?;
        }
        LayoutAction::Columns { file, now } => {
            let intervals = read_intervals(&file)?;
            print_json(&layout_columns(&intervals, now_or(now)))?;
        }
        LayoutAction::Lanes { file, gap } => {
            let markers = read_intervals(&file)?;
            let gap = gap.unwrap_or(config.layout.log_lane_gap_minutes);
            print_json(&layout_lanes(&markers, gap))?;
        }
    }
    Ok(())
}
