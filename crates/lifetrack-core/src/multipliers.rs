//! Per-goal and per-project point multipliers.
//!
//! Keys are normalized (trimmed, lowercased) on both write and lookup so
//! "Fitness " and "fitness" share one entry. Missing entries count as 1.0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Snapshot of user-configured multipliers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiplierState {
    #[serde(default)]
    pub goals: BTreeMap<String, f64>,
    #[serde(default)]
    pub projects: BTreeMap<String, f64>,
}

/// Normalize a goal/project name into a lookup key.
///
/// Returns `None` for missing or blank names.
pub fn normalize_key(name: Option<&str>) -> Option<String> {
    let trimmed = name?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn lookup(table: &BTreeMap<String, f64>, name: Option<&str>) -> f64 {
    normalize_key(name)
        .and_then(|key| table.get(&key).copied())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(1.0)
}

fn validated(kind: &str, name: &str, value: f64) -> Result<String, ValidationError> {
    let key = normalize_key(Some(name)).ok_or_else(|| ValidationError::EmptyName(kind.to_string()))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidMultiplier {
            name: name.to_string(),
            value,
        });
    }
    Ok(key)
}

impl MultiplierState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiplier for a goal, 1.0 when unset.
    pub fn goal_multiplier(&self, goal: Option<&str>) -> f64 {
        lookup(&self.goals, goal)
    }

    /// Multiplier for a project, 1.0 when unset.
    pub fn project_multiplier(&self, project: Option<&str>) -> f64 {
        lookup(&self.projects, project)
    }

    /// Goal × project multiplier, without the streak factor.
    pub fn combined(&self, goal: Option<&str>, project: Option<&str>) -> f64 {
        self.goal_multiplier(goal) * self.project_multiplier(project)
    }

    /// Insert or replace a goal multiplier.
    ///
    /// # Errors
    ///
    /// Rejects blank names and multipliers that are not finite and positive.
    pub fn upsert_goal(&mut self, goal: &str, value: f64) -> Result<(), ValidationError> {
        let key = validated("goal", goal, value)?;
        self.goals.insert(key, value);
        Ok(())
    }

    /// Insert or replace a project multiplier.
    ///
    /// # Errors
    ///
    /// Rejects blank names and multipliers that are not finite and positive.
    pub fn upsert_project(&mut self, project: &str, value: f64) -> Result<(), ValidationError> {
        let key = validated("project", project, value)?;
        self.projects.insert(key, value);
        Ok(())
    }

    pub fn remove_goal(&mut self, goal: &str) -> Option<f64> {
        normalize_key(Some(goal)).and_then(|key| self.goals.remove(&key))
    }

    pub fn remove_project(&mut self, project: &str) -> Option<f64> {
        normalize_key(Some(project)).and_then(|key| self.projects.remove(&key))
    }
}

/// Lookup a goal multiplier in `state`.
pub fn goal_multiplier(goal: Option<&str>, state: &MultiplierState) -> f64 {
    state.goal_multiplier(goal)
}

/// Lookup a project multiplier in `state`.
pub fn project_multiplier(project: Option<&str>, state: &MultiplierState) -> f64 {
    state.project_multiplier(project)
}

/// Multiplier derived from a goal's own importance rating.
///
/// `1 + importance/10` with importance clamped to [0, 10]; 1.0 when there is
/// no goal or no usable positive importance. `fallback_importance` is used
/// when the goal itself carries none.
pub fn resolve_goal_multiplier(
    goal: Option<&str>,
    goal_importance: Option<f64>,
    fallback_importance: Option<f64>,
) -> f64 {
    if normalize_key(goal).is_none() {
        return 1.0;
    }
    let importance = goal_importance.or(fallback_importance).unwrap_or(0.0);
    if !importance.is_finite() || importance <= 0.0 {
        return 1.0;
    }
    1.0 + importance.clamp(0.0, 10.0) / 10.0
}
