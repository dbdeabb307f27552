use std::path::PathBuf;

use clap::Subcommand;
use lifetrack_core::scoring::format_xp;
use lifetrack_core::{base_points, ScoringEngine, Workspace};

use super::{now_or, print_json, read_interval};

#[derive(Subcommand)]
pub enum ScoreAction {
    /// Points for a duration at a given importance and difficulty
    Points {
        /// Minutes spent
        #[arg(long)]
        minutes: f64,
        /// Importance 1-10 (default 5)
        #[arg(long)]
        importance: Option<f64>,
        /// Difficulty 1-10 (default 5)
        #[arg(long)]
        difficulty: Option<f64>,
        #[arg(long)]
        goal: Option<String>,
        #[arg(long)]
        project: Option<String>,
        /// Leave the streak multiplier out
        #[arg(long)]
        no_streak: bool,
        /// Instant the streak is evaluated at (epoch ms)
        #[arg(long)]
        now: Option<i64>,
    },
    /// Score one interval from a JSON file
    Interval {
        file: PathBuf,
        /// Instant running episodes are scored up to (epoch ms)
        #[arg(long)]
        now: Option<i64>,
        /// Count today toward the streak when the interval earns points
        #[arg(long)]
        record: bool,
    },
}

pub fn run(action: ScoreAction) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = Workspace::open()?;
    let multipliers = workspace.multipliers()?;
    let mut tracker = workspace.streak_tracker()?;

    match action {
        ScoreAction::Points {
            minutes,
            importance,
            difficulty,
            goal,
            project,
            no_streak,
            now,
        } => {
            let engine = ScoringEngine::from_tracker(&multipliers, &tracker, now_or(now));
            let base = base_points(importance, difficulty);
            let multiplier = engine.multiplier_for(goal.as_deref(), project.as_deref());
            let points = engine.points_for_minutes(base, minutes, multiplier, !no_streak);
            let streak_multiplier = if no_streak {
                1.0
            } else {
                engine.streak_multiplier()
            };
            print_json(&serde_json::json!({
                "base": base,
                "minutes": minutes,
                "multiplier": multiplier,
                "streak_multiplier": streak_multiplier,
                "points": points,
                "xp": format_xp(points, 1),
            }))?;
        }
        ScoreAction::Interval { file, now, record } => {
            let interval = read_interval(&file)?;
            let now = now_or(now);
            tracker.expire_stale(now);
            let engine = ScoringEngine::new(&multipliers, tracker.multiplier(), now);
            let breakdown = engine.breakdown(&interval, None, None);

            let transition = if record {
                let scored = engine.score_and_record_activity(&interval, &mut tracker);
                if scored.transition.is_some_and(|t| t.counted()) {
                    workspace.save_streak(&tracker)?;
                }
                scored.transition
            } else {
                None
            };
            print_json(&serde_json::json!({
                "id": interval.id,
                "breakdown": breakdown,
                "total_multiplier": breakdown.total_multiplier(),
                "xp": format_xp(breakdown.points, 1),
                "transition": transition,
            }))?;
        }
    }
    Ok(())
}
