//! Daily activity streak.
//!
//! The streak counts consecutive local calendar days with at least one
//! recorded activity and turns it into a compounding point multiplier.
//! [`StreakTracker`] is the single writer; [`SharedStreakTracker`] wraps it
//! for use from several threads.

mod messages;
mod policy;
mod shared;
mod tracker;

pub use messages::{
    days_to_next_milestone, level_up_message, message_for, multiplier_percent, streak_message,
    streak_multiplier,
};
pub use policy::{Milestone, MilestoneProgress, StreakPolicy};
pub use shared::SharedStreakTracker;
pub use tracker::{StreakDay, StreakInfo, StreakState, StreakTracker, StreakTransition};
