//! Constants for AirGuard Core
//!
//! Every default used by the calibrator and the scorer is defined here with
//! its unit in the name. Runtime code reads them through
//! [`AirQualityConfig`](crate::config::AirQualityConfig) rather than directly,
//! so tests can exercise edge values without touching these.
//!
//! ## Organization
//!
//! - **Calibration**: burn-in duration, baseline window and poll intervals
//! - **Scoring**: humidity reference, weighting and the gas/CO2/TVOC ranges

/// Burn-in window and polling cadence.
pub mod calibration;

/// Humidity reference and the ranges used by the derived metrics.
pub mod scoring;

pub use calibration::{
    BASELINE_WINDOW, BURN_IN_SECS, CALIBRATION_INTERVAL_MS, SCORING_INTERVAL_MS,
};

pub use scoring::{
    CO2_MAX_PPM, CO2_MIN_PPM, GAS_MAX_OHMS, GAS_MIN_OHMS, HUMIDITY_BASELINE_PCT,
    HUMIDITY_WEIGHTING, TVOC_MAX_PPB,
};
