//! Tunable streak parameters.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A named streak milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub days: u32,
    pub badge: String,
    pub message: String,
}

impl Milestone {
    pub fn new(days: u32, badge: &str, message: &str) -> Self {
        Self {
            days,
            badge: badge.to_string(),
            message: message.to_string(),
        }
    }
}

/// Distance to the next milestone above the current streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneProgress {
    pub milestone: u32,
    pub days: u32,
    pub badge: String,
}

/// Growth rate, cap and milestones for the daily streak.
///
/// Serialized as the `[streak]` section of the engine config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakPolicy {
    /// Compounding rate per streak day (0.01 = "1% better every day")
    #[serde(default = "default_growth_rate")]
    pub growth_rate: f64,
    /// Upper bound on the streak multiplier
    #[serde(default = "default_cap")]
    pub cap: f64,
    /// How many recorded days the streak history keeps
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_milestones")]
    pub milestones: Vec<Milestone>,
}

fn default_growth_rate() -> f64 {
    0.01
}
fn default_cap() -> f64 {
    3.0
}
fn default_history_limit() -> usize {
    365
}

pub(crate) fn default_milestones() -> Vec<Milestone> {
    vec![
        Milestone::new(7, "Week Warrior", "7 days of 1% better"),
        Milestone::new(21, "Habit Former", "21 days - habit forming!"),
        Milestone::new(30, "Monthly Master", "30 days of compound growth"),
        Milestone::new(66, "Automatic", "66 days - truly automatic"),
        Milestone::new(100, "Centurion", "100 days of showing up"),
        Milestone::new(365, "Annual Legend", "A full year of compounding"),
    ]
}

impl Default for StreakPolicy {
    fn default() -> Self {
        Self {
            growth_rate: default_growth_rate(),
            cap: default_cap(),
            milestones: default_milestones(),
            history_limit: default_history_limit(),
        }
    }
}

impl StreakPolicy {
    /// `min(cap, (1 + growth_rate)^streak)`.
    ///
    /// Unusable rates or caps (non-finite, negative, cap below 1) fall back
    /// to the defaults so a bad config never zeroes out scores.
    pub fn multiplier(&self, streak: u32) -> f64 {
        let rate = if self.growth_rate.is_finite() && self.growth_rate >= 0.0 {
            self.growth_rate
        } else {
            default_growth_rate()
        };
        let cap = if self.cap.is_finite() && self.cap >= 1.0 {
            self.cap
        } else {
            default_cap()
        };
        let exponent = i32::try_from(streak).unwrap_or(i32::MAX);
        (1.0 + rate).powi(exponent).min(cap)
    }

    /// Next milestone strictly above `streak`, `None` past the last one.
    pub fn next_milestone(&self, streak: u32) -> Option<MilestoneProgress> {
        self.milestones
            .iter()
            .filter(|m| m.days > streak)
            .min_by_key(|m| m.days)
            .map(|m| MilestoneProgress {
                milestone: m.days,
                days: m.days - streak,
                badge: m.badge.clone(),
            })
    }

    /// Milestone reached exactly at `streak`, if any.
    pub fn check_milestone(&self, streak: u32) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.days == streak)
    }

    /// Check the policy for values that would make the multiplier meaningless.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.growth_rate.is_finite() || self.growth_rate < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "streak.growth_rate".to_string(),
                message: format!("{} must be a finite, non-negative rate", self.growth_rate),
            });
        }
        if !self.cap.is_finite() || self.cap < 1.0 {
            return Err(ConfigError::InvalidValue {
                key: "streak.cap".to_string(),
                message: format!("{} must be finite and at least 1.0", self.cap),
            });
        }
        if self.milestones.iter().any(|m| m.days == 0) {
            return Err(ConfigError::InvalidValue {
                key: "streak.milestones".to_string(),
                message: "milestone days must be positive".to_string(),
            });
        }
        Ok(())
    }
}
