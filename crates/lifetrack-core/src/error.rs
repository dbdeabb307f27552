//! Core error types for lifetrack-core.
//!
//! The layout, aggregation and scoring engines are total and never return
//! errors. Errors only come out of configuration and state persistence, and
//! out of validated mutations such as multiplier upserts.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lifetrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Streak / multiplier state persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dotted configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// State repository errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read a state file
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a state file
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored state could not be decoded
    #[error("Corrupt state in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// In-memory repository lock was poisoned by a panicking writer
    #[error("State lock poisoned")]
    Poisoned,
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Interval ends before it starts
    #[error("Invalid time range: end_at ({end_at}) must not be before start_at ({start_at})")]
    InvalidTimeRange { start_at: i64, end_at: i64 },

    /// Multiplier must be a positive finite scalar
    #[error("Invalid multiplier for '{name}': {value} (must be finite and > 0)")]
    InvalidMultiplier { name: String, value: f64 },

    /// Empty name where a goal/project key is required
    #[error("Empty name for {0}")]
    EmptyName(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
