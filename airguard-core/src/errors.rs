//! Error Types for Calibration, Sensor Reads and Configuration
//!
//! ## Design Philosophy
//!
//! Errors are small, `Copy`, and carry only inline data or `&'static str`
//! reasons, so they can be returned from the polling hot path on a
//! microcontroller without allocation.
//!
//! ## Error Categories
//!
//! ### Fatal
//! - [`CalibrationError::InsufficientData`]: the burn-in window produced no
//!   stable sample, so there is no baseline and scoring cannot start.
//! - [`ConfigError`]: a configuration value would make a formula divide by
//!   zero or invert a range.
//!
//! ### Per-cycle
//! - [`SensorError::Unavailable`]: one read failed. The caller skips the
//!   cycle and tries again on the next poll.
//! - [`SensorError::EndOfStream`]: a finite source (replay, file) ran out.
//!
//! Numeric oddities (resistance outside the clamp range, humidity outside
//! 0-100%) are never errors; the scorer clamps them.
//!
//! ## Handling Strategy
//!
//! ```rust
//! use airguard_core::{SensorError, SampleSource, ReplaySource, Sample};
//!
//! let samples = [Sample::stable(50_000.0, 40.0)];
//! let mut source = ReplaySource::new(&samples);
//!
//! loop {
//!     match source.read() {
//!         Ok(_sample) => { /* score it */ }
//!         Err(nb::Error::WouldBlock) => { /* nothing new this poll */ }
//!         Err(nb::Error::Other(SensorError::Unavailable { .. })) => { /* skip cycle */ }
//!         Err(nb::Error::Other(SensorError::EndOfStream)) => break,
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for calibration
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Burn-in calibration failures
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// No stable sample was collected during the whole burn-in window
    #[error("Insufficient calibration data: no stable samples in {window_secs}s burn-in")]
    InsufficientData {
        /// Length of the burn-in window that produced nothing
        window_secs: u64,
    },

    /// Burn-in readings averaged to a resistance the scorer cannot use
    #[error("Invalid gas baseline {gas_baseline} Ω after burn-in")]
    InvalidBaseline {
        /// The rejected mean resistance
        gas_baseline: f32,
    },
}

/// Failures reported by a [`SampleSource`](crate::source::SampleSource)
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// The read failed (bus error, device not responding, malformed data)
    #[error("Sensor unavailable: {reason}")]
    Unavailable {
        /// What went wrong
        reason: &'static str,
    },

    /// A finite source has no more samples
    #[error("End of sample stream")]
    EndOfStream,
}

/// Rejected configuration values
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Humidity baseline must lie strictly between 0 and 100 %RH
    #[error("Humidity baseline {value} must be within (0, 100)")]
    HumidityBaseline {
        /// Rejected value (%RH)
        value: f32,
    },

    /// Humidity weighting must lie within [0, 1]
    #[error("Humidity weighting {value} must be within [0, 1]")]
    HumidityWeighting {
        /// Rejected weighting
        value: f32,
    },

    /// Gas baseline must be a positive, finite resistance
    #[error("Gas baseline {value} Ω must be positive and finite")]
    GasBaseline {
        /// Rejected resistance (Ω)
        value: f32,
    },

    /// Clamp bounds must be finite with min < max
    #[error("Range [{min}, {max}] for {quantity} is empty or not finite")]
    InvalidRange {
        /// Which clamp range
        quantity: &'static str,
        /// Configured lower bound
        min: f32,
        /// Configured upper bound
        max: f32,
    },

    /// Poll intervals and burn-in length must be non-zero
    #[error("{field} must be greater than zero")]
    ZeroDuration {
        /// Name of the configuration field
        field: &'static str,
    },
}
