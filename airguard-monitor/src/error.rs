//! Error types for airguard-monitor

use std::path::PathBuf;

use airguard_core::{CalibrationError, ConfigError};
use thiserror::Error;

/// Main error type for the monitor
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Configuration file could not be read
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for this schema
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Merged configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Simulation parameters out of range
    #[error("Invalid simulation settings: {0}")]
    Simulation(String),

    /// Burn-in produced no usable baseline
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// Report output or sample file I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for monitor operations
pub type Result<T> = std::result::Result<T, MonitorError>;
