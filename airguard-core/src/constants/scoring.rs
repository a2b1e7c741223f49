//! Air Quality Scoring Parameters
//!
//! ## Composite Score
//!
//! The composite score splits 100 points between humidity and gas:
//!
//! ```text
//! humidity share = HUMIDITY_WEIGHTING * 100      = 25
//! gas share      = 100 - humidity share          = 75
//! ```
//!
//! ## Derived Metrics
//!
//! AQI, CO2 and TVOC are linear maps of the clamped gas resistance. They are
//! illustrative proxies, not measurements.

// ===== HUMIDITY =====

/// Reference relative humidity for the composite score (%RH).
///
/// 40% sits in the middle of the ASHRAE comfort band.
pub const HUMIDITY_BASELINE_PCT: f32 = 40.0;

/// Share of the composite score given to humidity (0.0 - 1.0).
pub const HUMIDITY_WEIGHTING: f32 = 0.25;

// ===== GAS RESISTANCE =====

/// Lower clamp for gas resistance (Ω). Maps to AQI 500.
pub const GAS_MIN_OHMS: f32 = 10.0;

/// Upper clamp for gas resistance (Ω). Maps to AQI 1.
pub const GAS_MAX_OHMS: f32 = 1_400_000.0;

// ===== AQI SCALE =====

/// Worst AQI value.
pub const AQI_MAX: u16 = 500;

/// Number of AQI steps spread across the gas range.
pub const AQI_STEPS: f32 = 499.0;

// ===== PROXIES =====

/// Estimated CO2 at AQI 0 (ppm). Typical outdoor air.
pub const CO2_MIN_PPM: f32 = 400.0;

/// Estimated CO2 at AQI 500 (ppm).
pub const CO2_MAX_PPM: f32 = 2_500.0;

/// Estimated TVOC at the lower gas clamp (ppb).
pub const TVOC_MAX_PPB: f32 = 1_000.0;
