use clap::Subcommand;
use lifetrack_core::streak::level_up_message;
use lifetrack_core::Workspace;

use super::{now_or, print_json};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Current streak, multiplier and next milestone
    Show {
        /// Evaluate at this instant (epoch ms) instead of now
        #[arg(long)]
        now: Option<i64>,
    },
    /// Count a day as active
    Record {
        /// Activity instant (epoch ms), defaults to now
        #[arg(long)]
        at: Option<i64>,
    },
    /// Reset the current streak if a day was missed
    Expire {
        #[arg(long)]
        now: Option<i64>,
    },
    /// List configured milestones
    Milestones,
    /// Celebration text for a level
    Level { level: u32 },
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = Workspace::open()?;

    match action {
        StreakAction::Show { now } => {
            // Display only; a missed day shows as a broken streak without saving
            let mut tracker = workspace.streak_tracker()?;
            tracker.expire_stale(now_or(now));
            print_json(&tracker.info())?;
        }
        StreakAction::Record { at } => {
            let mut tracker = workspace.streak_tracker()?;
            let transition = tracker.record_activity(now_or(at));
            if transition.counted() {
                workspace.save_streak(&tracker)?;
            }
            print_json(&serde_json::json!({
                "transition": transition,
                "milestone": tracker.milestone_reached(),
                "streak": tracker.info(),
            }))?;
        }
        StreakAction::Expire { now } => {
            let mut tracker = workspace.streak_tracker()?;
            let expired = tracker.expire_stale(now_or(now));
            if expired {
                workspace.save_streak(&tracker)?;
            }
            print_json(&serde_json::json!({
                "expired": expired,
                "streak": tracker.info(),
            }))?;
        }
        StreakAction::Milestones => print_json(&workspace.config().streak.milestones)?,
        StreakAction::Level { level } => println!("{}", level_up_message(level)),
    }
    Ok(())
}
