//! Immutable configuration for calibration and scoring
//!
//! The calibrator and scorer never read constants directly; they take an
//! [`AirQualityConfig`]. Defaults reproduce the classic BME680 burn-in
//! recipe (5 minutes, 40 %RH reference, 25% humidity weighting).
//!
//! ```rust
//! use airguard_core::AirQualityConfig;
//!
//! // Shorter burn-in for a bench test
//! let config = AirQualityConfig::default()
//!     .with_burn_in_secs(60)
//!     .with_hum_baseline(45.0);
//! assert!(config.validate().is_ok());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{calibration, scoring};
use crate::errors::ConfigError;

/// Tunables for the burn-in and scoring phases
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AirQualityConfig {
    /// Burn-in window length (seconds)
    pub burn_in_secs: u64,
    /// Poll interval during burn-in (ms)
    pub calibration_interval_ms: u64,
    /// Poll interval during scoring (ms)
    pub scoring_interval_ms: u64,
    /// Reference humidity (%RH)
    pub hum_baseline: f32,
    /// Humidity share of the composite score (0.0 - 1.0)
    pub hum_weighting: f32,
    /// Lower gas clamp (Ω)
    pub gas_min_ohms: f32,
    /// Upper gas clamp (Ω)
    pub gas_max_ohms: f32,
    /// CO2 estimate at AQI 0 (ppm)
    pub co2_min_ppm: f32,
    /// CO2 estimate at AQI 500 (ppm)
    pub co2_max_ppm: f32,
    /// TVOC estimate at the lower gas clamp (ppb)
    pub tvoc_max_ppb: f32,
}

impl AirQualityConfig {
    /// Default configuration, usable in `const` and `static` contexts
    pub const DEFAULT: Self = Self {
        burn_in_secs: calibration::BURN_IN_SECS,
        calibration_interval_ms: calibration::CALIBRATION_INTERVAL_MS,
        scoring_interval_ms: calibration::SCORING_INTERVAL_MS,
        hum_baseline: scoring::HUMIDITY_BASELINE_PCT,
        hum_weighting: scoring::HUMIDITY_WEIGHTING,
        gas_min_ohms: scoring::GAS_MIN_OHMS,
        gas_max_ohms: scoring::GAS_MAX_OHMS,
        co2_min_ppm: scoring::CO2_MIN_PPM,
        co2_max_ppm: scoring::CO2_MAX_PPM,
        tvoc_max_ppb: scoring::TVOC_MAX_PPB,
    };

    /// Set the burn-in length (seconds)
    pub const fn with_burn_in_secs(mut self, secs: u64) -> Self {
        self.burn_in_secs = secs;
        self
    }

    /// Set the burn-in poll interval (ms)
    pub const fn with_calibration_interval_ms(mut self, ms: u64) -> Self {
        self.calibration_interval_ms = ms;
        self
    }

    /// Set the scoring poll interval (ms)
    pub const fn with_scoring_interval_ms(mut self, ms: u64) -> Self {
        self.scoring_interval_ms = ms;
        self
    }

    /// Set the reference humidity (%RH)
    pub const fn with_hum_baseline(mut self, pct: f32) -> Self {
        self.hum_baseline = pct;
        self
    }

    /// Set the humidity share of the score (0.0 - 1.0)
    pub const fn with_hum_weighting(mut self, weighting: f32) -> Self {
        self.hum_weighting = weighting;
        self
    }

    /// Set the gas clamp range (Ω)
    pub const fn with_gas_range(mut self, min_ohms: f32, max_ohms: f32) -> Self {
        self.gas_min_ohms = min_ohms;
        self.gas_max_ohms = max_ohms;
        self
    }

    /// Burn-in window in milliseconds
    pub const fn burn_in_ms(&self) -> u64 {
        self.burn_in_secs.saturating_mul(1_000)
    }

    /// Humidity share of the composite score in points (25 by default)
    pub fn hum_points(&self) -> f32 {
        self.hum_weighting * 100.0
    }

    /// Gas share of the composite score in points (75 by default)
    pub fn gas_points(&self) -> f32 {
        100.0 - self.hum_points()
    }

    /// Width of the gas clamp range (Ω), widened so integer ohms stay exact
    pub fn gas_span(&self) -> f64 {
        f64::from(self.gas_max_ohms) - f64::from(self.gas_min_ohms)
    }

    /// Check that every formula stays well defined.
    ///
    /// The humidity sub-score divides by `hum_baseline` and by
    /// `100 - hum_baseline`; the metrics divide by the gas span.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.hum_baseline > 0.0 && self.hum_baseline < 100.0) {
            return Err(ConfigError::HumidityBaseline {
                value: self.hum_baseline,
            });
        }

        if !(0.0..=1.0).contains(&self.hum_weighting) {
            return Err(ConfigError::HumidityWeighting {
                value: self.hum_weighting,
            });
        }

        check_range("gas resistance", self.gas_min_ohms, self.gas_max_ohms)?;
        check_range("CO2 estimate", self.co2_min_ppm, self.co2_max_ppm)?;
        check_range("TVOC estimate", 0.0, self.tvoc_max_ppb)?;

        if self.burn_in_secs == 0 {
            return Err(ConfigError::ZeroDuration { field: "burn_in_secs" });
        }
        if self.calibration_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "calibration_interval_ms",
            });
        }
        if self.scoring_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "scoring_interval_ms",
            });
        }

        Ok(())
    }
}

fn check_range(quantity: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { quantity, min, max })
    }
}

impl Default for AirQualityConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
