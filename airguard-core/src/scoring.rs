//! Composite Air Quality Scoring
//!
//! ## Composite Score
//!
//! The score adds a humidity term and a gas term, each relative to the
//! [`Baseline`]. With the default 0.25 weighting humidity is worth up to 25
//! points and gas up to 75.
//!
//! ### Humidity term
//!
//! Peaks at the reference humidity and falls off linearly on both sides:
//!
//! ```text
//! offset = humidity - hum_baseline
//!
//! offset > 0:  (100 - hum_baseline - offset) / (100 - hum_baseline) * hum_points
//! offset <= 0: (hum_baseline + offset) / hum_baseline * hum_points
//! ```
//!
//! Humidity outside 0-100% drives the term negative; it is not clamped.
//!
//! ### Gas term
//!
//! Resistance below the baseline means more VOCs, scored proportionally.
//! Resistance at or above the baseline earns the full gas share and no more:
//!
//! ```text
//! gas < gas_baseline:  gas / gas_baseline * gas_points
//! otherwise:           gas_points
//! ```
//!
//! The sum is never clamped. It reads 100 in reference conditions but can
//! drift outside 0-100 and is only meant for watching trends.
//!
//! ## Derived Metrics
//!
//! AQI, CO2 and TVOC come from [`metrics`](crate::metrics) and depend only on
//! the raw gas resistance.

use crate::config::AirQualityConfig;
use crate::errors::ConfigError;
use crate::metrics::{aqi_to_co2, gas_to_aqi, gas_to_tvoc};
use crate::sample::{Baseline, Sample, ScoreResult};

/// Scores stable samples against a fixed baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirQualityScorer {
    baseline: Baseline,
    config: AirQualityConfig,
}

impl AirQualityScorer {
    /// Create a scorer after checking every divisor it will use
    pub fn new(baseline: Baseline, config: AirQualityConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        if !(baseline.hum_baseline > 0.0 && baseline.hum_baseline < 100.0) {
            return Err(ConfigError::HumidityBaseline {
                value: baseline.hum_baseline,
            });
        }
        if !(0.0..=1.0).contains(&baseline.hum_weighting) {
            return Err(ConfigError::HumidityWeighting {
                value: baseline.hum_weighting,
            });
        }
        if !(baseline.gas_baseline.is_finite() && baseline.gas_baseline > 0.0) {
            return Err(ConfigError::GasBaseline {
                value: baseline.gas_baseline,
            });
        }

        Ok(Self { baseline, config })
    }

    /// The baseline every sample is compared against
    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// Configuration used for clamping and derived metrics
    pub fn config(&self) -> &AirQualityConfig {
        &self.config
    }

    /// Score a sample. Unstable samples yield `None`.
    pub fn score(&self, sample: &Sample) -> Option<ScoreResult> {
        if !sample.is_stable {
            return None;
        }
        Some(self.evaluate(sample.gas_resistance, sample.humidity))
    }

    /// Score raw values without the stability check
    pub fn evaluate(&self, gas_resistance: f32, humidity: f32) -> ScoreResult {
        let hum_score = self.humidity_score(humidity);
        let gas_score = self.gas_score(gas_resistance);

        let aqi_value = gas_to_aqi(gas_resistance, &self.config);

        ScoreResult {
            hum_score,
            gas_score,
            air_quality_score: hum_score + gas_score,
            aqi_value,
            estimated_co2_ppm: aqi_to_co2(aqi_value, &self.config),
            estimated_tvoc_ppb: gas_to_tvoc(gas_resistance, &self.config),
        }
    }

    /// Humidity sub-score, at most `hum_weighting * 100`
    pub fn humidity_score(&self, humidity: f32) -> f32 {
        let hum_baseline = self.baseline.hum_baseline;
        let hum_points = self.baseline.hum_weighting * 100.0;
        let hum_offset = humidity - hum_baseline;

        if hum_offset > 0.0 {
            (100.0 - hum_baseline - hum_offset) / (100.0 - hum_baseline) * hum_points
        } else {
            (hum_baseline + hum_offset) / hum_baseline * hum_points
        }
    }

    /// Gas sub-score, capped at `100 - hum_weighting * 100`
    pub fn gas_score(&self, gas_resistance: f32) -> f32 {
        let gas_baseline = self.baseline.gas_baseline;
        let gas_points = 100.0 - self.baseline.hum_weighting * 100.0;
        let gas_offset = gas_baseline - gas_resistance;

        if gas_offset > 0.0 {
            gas_resistance / gas_baseline * gas_points
        } else {
            gas_points
        }
    }
}
