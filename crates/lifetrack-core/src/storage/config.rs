//! TOML-based engine configuration.
//!
//! Stores the tunable parts of the engine:
//! - Streak growth rate, cap and milestones
//! - Lane spacing for point-in-time markers
//! - The UTC offset that defines local calendar days
//! - Report defaults
//!
//! Configuration is stored at `~/.config/lifetrack/config.toml`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::data_dir;
use crate::aggregate::{AggregateOptions, BreakdownKey, BreakdownMetric, BreakdownOptions};
use crate::clock::DayClock;
use crate::error::ConfigError;
use crate::layout::DEFAULT_LOG_LANE_GAP_MINUTES;
use crate::streak::StreakPolicy;

pub(super) const CONFIG_FILE: &str = "config.toml";

/// Day view layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Minimum spacing between markers sharing a lane
    #[serde(default = "default_log_lane_gap")]
    pub log_lane_gap_minutes: i64,
}

/// Calendar day configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Local offset from UTC; days run midnight to midnight at this offset
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// Dashboard report defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub include_logs: bool,
    /// Rows kept by a breakdown; 0 keeps all
    #[serde(default = "default_breakdown_limit")]
    pub breakdown_limit: usize,
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/lifetrack/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub streak: StreakPolicy,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

fn default_log_lane_gap() -> i64 {
    DEFAULT_LOG_LANE_GAP_MINUTES
}
fn default_breakdown_limit() -> usize {
    8
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            log_lane_gap_minutes: default_log_lane_gap(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_logs: false,
            breakdown_limit: default_breakdown_limit(),
        }
    }
}

impl EngineConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn parse_like(
        existing: &serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<serde_json::Value, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let parsed = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(format!("'{value}': {e}")))?,
            ),
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<i64>() {
                    serde_json::Value::Number(n.into())
                } else if let Ok(n) = value.parse::<f64>() {
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                } else {
                    return Err(invalid(format!("cannot parse '{value}' as number")));
                }
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            _ => serde_json::Value::String(value.into()),
        };
        Ok(parsed)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        if key.is_empty() {
            return Err(unknown());
        }

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;
                let new_value = Self::parse_like(existing, key, value)?;
                obj.insert(part.to_string(), new_value);
                return Ok(());
            }
            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join(CONFIG_FILE))
    }

    /// Load from the data directory, writing the default when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// validated, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing the default when missing.
    ///
    /// Only a missing file is replaced; an unreadable one is reported and
    /// left untouched.
    ///
    /// # Errors
    ///
    /// See [`EngineConfig::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: EngineConfig =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                cfg.validate()?;
                debug!(path = %path.display(), "loaded config");
                Ok(cfg)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// See [`EngineConfig::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// The value is parsed as the type currently stored under `key`, and the
    /// resulting config must validate. On error `self` is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the new config is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: EngineConfig =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check every section for values the engine cannot use.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.streak.validate()?;
        if self.layout.log_lane_gap_minutes < 0 {
            return Err(ConfigError::InvalidValue {
                key: "layout.log_lane_gap_minutes".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if DayClock::from_offset_minutes(self.clock.utc_offset_minutes).is_none() {
            return Err(ConfigError::InvalidValue {
                key: "clock.utc_offset_minutes".to_string(),
                message: format!("{} is not a valid UTC offset", self.clock.utc_offset_minutes),
            });
        }
        Ok(())
    }

    /// Clock for the configured offset, UTC when the offset is unusable.
    pub fn day_clock(&self) -> DayClock {
        DayClock::from_offset_minutes(self.clock.utc_offset_minutes).unwrap_or_else(|| {
            warn!(
                offset = self.clock.utc_offset_minutes,
                "invalid utc offset, using UTC"
            );
            DayClock::utc()
        })
    }

    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            include_logs: self.report.include_logs,
            ..Default::default()
        }
    }

    pub fn breakdown_options(&self, key: BreakdownKey, sort_by: BreakdownMetric) -> BreakdownOptions {
        BreakdownOptions {
            key,
            sort_by,
            include_logs: self.report.include_logs,
            limit: (self.report.breakdown_limit > 0).then_some(self.report.breakdown_limit),
        }
    }
}
