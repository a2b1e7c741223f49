//! Sensor samples, the calibrated baseline and per-sample scores
//!
//! These are plain value types. Nothing here knows how samples are read or
//! how scores are displayed.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::AirQualityConfig;

/// One reading from a BME680-class gas sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Gas sensor resistance in ohms. Drops as VOC concentration rises.
    pub gas_resistance: f32,
    /// Relative humidity, %RH
    pub humidity: f32,
    /// Air temperature, °C (reporting only)
    pub temperature: f32,
    /// Barometric pressure, hPa (reporting only)
    pub pressure: f32,
    /// Heater reached its target temperature for this measurement.
    /// Readings taken before that are meaningless and must be dropped.
    pub is_stable: bool,
}

impl Sample {
    /// Full reading
    pub const fn new(
        gas_resistance: f32,
        humidity: f32,
        temperature: f32,
        pressure: f32,
        is_stable: bool,
    ) -> Self {
        Self {
            gas_resistance,
            humidity,
            temperature,
            pressure,
            is_stable,
        }
    }

    /// Stable reading with room-temperature, sea-level pass-through values
    pub const fn stable(gas_resistance: f32, humidity: f32) -> Self {
        Self::new(gas_resistance, humidity, 21.0, 1013.25, true)
    }

    /// Reading taken while the heater was still warming up
    pub const fn unstable(gas_resistance: f32, humidity: f32) -> Self {
        Self::new(gas_resistance, humidity, 21.0, 1013.25, false)
    }
}

/// Reference values the scorer compares every sample against.
///
/// Built once when burn-in completes and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Baseline {
    /// Mean gas resistance of the last stable burn-in readings (Ω)
    pub gas_baseline: f32,
    /// Reference humidity (%RH), taken from configuration
    pub hum_baseline: f32,
    /// Humidity share of the composite score
    pub hum_weighting: f32,
    /// Number of readings the gas baseline was averaged over
    pub sample_count: usize,
}

impl Baseline {
    /// Combine a measured gas baseline with the configured humidity reference
    pub fn new(gas_baseline: f32, sample_count: usize, config: &AirQualityConfig) -> Self {
        Self {
            gas_baseline,
            hum_baseline: config.hum_baseline,
            hum_weighting: config.hum_weighting,
            sample_count,
        }
    }
}

/// Scores derived from a single stable sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScoreResult {
    /// Humidity sub-score
    pub hum_score: f32,
    /// Gas sub-score
    pub gas_score: f32,
    /// `hum_score + gas_score`. Higher is better. Not bounded to 0-100;
    /// treat it as a trend indicator.
    pub air_quality_score: f32,
    /// 1 (clean) to 500 (bad)
    pub aqi_value: u16,
    /// Illustrative CO2 equivalent derived from the AQI
    pub estimated_co2_ppm: f32,
    /// Illustrative TVOC equivalent derived from gas resistance
    pub estimated_tvoc_ppb: f32,
}
