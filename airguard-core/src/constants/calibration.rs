//! Burn-in Calibration Parameters
//!
//! A metal-oxide gas sensor needs several minutes of heater time before its
//! resistance settles. The baseline is taken from the tail of that warm-up.

/// Length of the burn-in window (seconds).
///
/// Five minutes is enough for a BME680 heater at 320°C / 150ms to settle
/// in typical indoor air.
pub const BURN_IN_SECS: u64 = 300;

/// Number of most recent stable readings averaged into the gas baseline.
///
/// At one read per second this covers the last ~50 seconds of burn-in.
pub const BASELINE_WINDOW: usize = 50;

/// Poll interval while collecting burn-in data (ms).
pub const CALIBRATION_INTERVAL_MS: u64 = 1_000;

/// Poll interval once scoring has started (ms).
pub const SCORING_INTERVAL_MS: u64 = 5_000;
