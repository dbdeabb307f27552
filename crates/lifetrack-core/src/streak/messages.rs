//! Deterministic streak and level-up copy for the UI.

use super::policy::{MilestoneProgress, StreakPolicy};

/// Encouragement line for the current streak.
///
/// Brackets follow the default milestones; the multiplier bracket reports
/// whatever multiplier the policy yields for `streak`.
pub fn message_for(streak: u32, policy: &StreakPolicy) -> String {
    match streak {
        0 => "Start your 1% journey today".to_string(),
        1 => "Day 1. Every journey begins here.".to_string(),
        2..=6 => format!("Day {streak}. Small habits, big results."),
        7..=20 => format!("Day {streak}. You're building momentum."),
        21..=29 => format!("Day {streak}. The compound effect is real."),
        30..=65 => format!("Day {streak}. You're becoming who you want to be."),
        66..=99 => format!("Day {streak}. This is who you are now."),
        100..=364 => format!(
            "Day {streak}. {} multiplier active!",
            multiplier_percent(policy.multiplier(streak))
        ),
        _ => format!("Day {streak}. Legend status achieved."),
    }
}

/// Bonus over 1.0 as a whole percentage, e.g. `1.123` → `"+12%"`.
pub fn multiplier_percent(multiplier: f64) -> String {
    if !multiplier.is_finite() {
        return "+0%".to_string();
    }
    format!("+{:.0}%", (multiplier - 1.0).max(0.0) * 100.0)
}

const LEVEL_MESSAGES: &[(u32, &str)] = &[
    (5, "Small habits, remarkable results. You're 5 levels into your transformation."),
    (10, "The aggregation of marginal gains. Each choice compounds."),
    (15, "You're not just changing what you do. You're changing who you are."),
    (20, "You fall to the level of your systems. Yours are solid."),
    (25, "The most powerful outcomes come from compound growth. Keep stacking."),
    (30, "Every action is a vote for the person you want to become. 30 levels of votes."),
    (40, "Habits are the compound interest of self-improvement."),
    (50, "50 levels. The difference is not your goals, it's your systems."),
    (75, "Success is the product of daily habits, not once-in-a-lifetime transformations."),
    (100, "The best outcomes are delayed. You persisted through 100 levels of compound growth."),
];

/// Celebration text for the highest level milestone at or below `level`.
pub fn level_up_message(level: u32) -> String {
    LEVEL_MESSAGES
        .iter()
        .rev()
        .find(|(threshold, _)| level >= *threshold)
        .map_or_else(
            || format!("Level {level}. Another 1% in the bank."),
            |(_, message)| (*message).to_string(),
        )
}

/// [`StreakPolicy::next_milestone`] under the default policy.
pub fn days_to_next_milestone(streak: u32) -> Option<MilestoneProgress> {
    StreakPolicy::default().next_milestone(streak)
}

/// [`message_for`] under the default policy.
pub fn streak_message(streak: u32) -> String {
    message_for(streak, &StreakPolicy::default())
}

/// Streak multiplier under the default policy.
pub fn streak_multiplier(streak: u32) -> f64 {
    StreakPolicy::default().multiplier(streak)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_to_next_milestone() {
        let next = days_to_next_milestone(6).unwrap();
        assert_eq!(next.milestone, 7);
        assert_eq!(next.days, 1);
        assert!(days_to_next_milestone(400).is_none());
        assert_eq!(days_to_next_milestone(0).unwrap().days, 7);
    }

    #[test]
    fn test_streak_message_brackets() {
        assert_eq!(streak_message(0), "Start your 1% journey today");
        assert_eq!(streak_message(1), "Day 1. Every journey begins here.");
        assert!(streak_message(5).contains("Small habits"));
        assert!(streak_message(7).contains("momentum"));
        assert!(streak_message(21).contains("compound effect"));
        assert!(streak_message(66).contains("who you are now"));
        assert_eq!(streak_message(500), "Day 500. Legend status achieved.");
    }

    #[test]
    fn test_streak_message_is_deterministic() {
        for streak in [0, 3, 15, 45, 150, 364, 365] {
            assert_eq!(streak_message(streak), streak_message(streak));
        }
    }

    #[test]
    fn test_multiplier_bracket_reports_capped_value() {
        // 1.01^150 is above the default cap of 3.0
        assert_eq!(streak_message(150), "Day 150. +200% multiplier active!");
    }

    #[test]
    fn test_multiplier_percent() {
        assert_eq!(multiplier_percent(1.0), "+0%");
        assert_eq!(multiplier_percent(1.3), "+30%");
        assert_eq!(multiplier_percent(f64::NAN), "+0%");
    }

    #[test]
    fn test_level_up_message() {
        assert_eq!(level_up_message(3), "Level 3. Another 1% in the bank.");
        assert!(level_up_message(5).starts_with("Small habits"));
        assert_eq!(level_up_message(12), level_up_message(10));
        assert!(level_up_message(250).contains("100 levels"));
    }
}
