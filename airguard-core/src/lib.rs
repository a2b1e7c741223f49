//! Indoor air quality estimation for BME680-class gas sensors
//!
//! Turns raw gas resistance and humidity readings into a composite air
//! quality score and illustrative AQI/CO2/TVOC figures.
//! Designed for edge devices with limited resources.
//!
//! Key constraints:
//! - `no_std` without the `std` feature
//! - No heap allocation: the burn-in history is a fixed ring buffer
//! - Single-threaded; the baseline is written once and then read-only
//!
//! ## Lifecycle
//!
//! 1. **Burn-in**: [`BaselineCalibrator`] collects stable readings for
//!    `burn_in_secs` and averages the most recent 50 into a [`Baseline`].
//! 2. **Scoring**: [`AirQualityScorer`] compares each stable reading with the
//!    baseline and produces a [`ScoreResult`].
//!
//! [`AirQualityPipeline`] wraps both phases for callers that own their poll
//! loop.
//!
//! ```no_run
//! use airguard_core::{AirQualityConfig, AirQualityScorer, BaselineCalibrator, ReplaySource, FixedTime, Sample, SampleSource};
//!
//! let config = AirQualityConfig::default();
//! let recording = [Sample::stable(52_000.0, 41.0); 600];
//! let mut source = ReplaySource::new(&recording);
//! let mut clock = FixedTime::new(0);
//!
//! let baseline = BaselineCalibrator::calibrate(config, &mut source, &mut clock)
//!     .expect("burn-in produced no stable readings");
//! let scorer = AirQualityScorer::new(baseline, config).expect("valid configuration");
//!
//! while let Ok(sample) = source.read() {
//!     if let Some(score) = scorer.score(&sample) {
//!         // AQI 1 (clean) .. 500 (bad)
//!         let _ = score.aqi_value;
//!     }
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod calibration;
pub mod config;
pub mod constants;
pub mod errors;
pub mod metrics;
pub mod pipeline;
pub mod sample;
pub mod scoring;
pub mod source;
pub mod time;

// Public API
pub use calibration::BaselineCalibrator;
pub use config::AirQualityConfig;
pub use errors::{CalibrationError, CalibrationResult, ConfigError, SensorError};
pub use metrics::{aqi_to_co2, gas_to_aqi, gas_to_tvoc};
pub use pipeline::{AirQualityPipeline, Outcome, Phase};
pub use sample::{Baseline, Sample, ScoreResult};
pub use scoring::AirQualityScorer;
pub use source::{ReplaySource, SampleSource};
pub use time::{Clock, FixedTime, TimeSource, Timestamp};

#[cfg(feature = "std")]
pub use source::{CsvSource, CsvSourceStats};

#[cfg(feature = "std")]
pub use time::MonotonicTime;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
