//! Derived Air Quality Metrics
//!
//! ## Overview
//!
//! Three linear maps turn a gas resistance into numbers people recognise.
//! None of them is a measurement; a MOX sensor cannot tell CO2 from VOCs.
//! They only track the direction of air quality.
//!
//! ```text
//!   gas resistance (Ω)      10 ─────────────────────── 1 400 000
//!   AQI                    500 ───────────────────────         1
//!   TVOC (ppb)            1000 ───────────────────────         0
//!
//!   AQI                      0 ───────────────────────       500
//!   CO2 (ppm)              400 ───────────────────────      2500
//! ```
//!
//! ## Clamping
//!
//! Resistance is clamped into `[gas_min_ohms, gas_max_ohms]` first, which
//! makes every function total: any input, including values far outside the
//! sensor's range, maps to the value at the nearest bound. NaN is treated as
//! the lower bound (worst air).
//!
//! ## AQI Rounding
//!
//! ```text
//! aqi = 500 - floor((gas - min) / (max - min) * 499)
//! ```
//!
//! With `floor` the top of the range maps to exactly 1 and the bottom to 500.
//! The fraction is computed in `f64`: in `f32` a handful of integer
//! resistances land a hair below an AQI step and floor one step low
//! (507 822 Ω gave 319 instead of 320).

use crate::config::AirQualityConfig;
use crate::constants::scoring::{AQI_MAX, AQI_STEPS};

/// Clamp gas resistance into the configured range
#[inline]
pub fn clamp_gas(gas_resistance: f32, config: &AirQualityConfig) -> f32 {
    // f32::max returns the other operand for NaN, so NaN lands on the lower bound
    gas_resistance
        .max(config.gas_min_ohms)
        .min(config.gas_max_ohms)
}

/// Position of the clamped resistance within the range, 0.0 (dirty) to 1.0 (clean)
#[inline]
fn gas_fraction(gas_resistance: f32, config: &AirQualityConfig) -> f64 {
    let offset = f64::from(clamp_gas(gas_resistance, config)) - f64::from(config.gas_min_ohms);
    offset / config.gas_span()
}

/// Map gas resistance to an AQI value in `[1, 500]`
pub fn gas_to_aqi(gas_resistance: f32, config: &AirQualityConfig) -> u16 {
    let steps = libm::floor(gas_fraction(gas_resistance, config) * f64::from(AQI_STEPS));
    // steps is within [0, 499] after clamping
    AQI_MAX - steps as u16
}

/// Map an AQI value to an estimated CO2 concentration (ppm)
pub fn aqi_to_co2(aqi_value: u16, config: &AirQualityConfig) -> f32 {
    let span = config.co2_max_ppm - config.co2_min_ppm;
    config.co2_min_ppm + span * (aqi_value as f32 / AQI_MAX as f32)
}

/// Map gas resistance to an estimated TVOC concentration (ppb)
pub fn gas_to_tvoc(gas_resistance: f32, config: &AirQualityConfig) -> f32 {
    let tvoc_max = f64::from(config.tvoc_max_ppb);
    (tvoc_max - gas_fraction(gas_resistance, config) * tvoc_max) as f32
}
