//! Common test utilities and sample generators for integration tests
//!
//! Provides:
//! - A BME680-like burn-in generator (heater warm-up, settling resistance)
//! - Sources that fail or stall on demand
//! - Small assertion helpers

#![allow(dead_code)]

use airguard_core::{Sample, SampleSource, SensorError};

/// Deterministic generator for burn-in and scoring sessions
pub struct SessionGenerator {
    seed: u32,
}

impl SessionGenerator {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// One sample per second for `seconds`.
    ///
    /// The first `warmup` readings are unstable with low resistance. The
    /// resistance then climbs from 60% of `settled_ohms` towards
    /// `settled_ohms` with ±`noise_pct` jitter.
    pub fn burn_in(
        &mut self,
        seconds: usize,
        warmup: usize,
        settled_ohms: f32,
        noise_pct: f32,
    ) -> Vec<Sample> {
        (0..seconds)
            .map(|t| {
                if t < warmup {
                    return Sample::unstable(settled_ohms * 0.1, 40.0);
                }
                let progress = ((t - warmup) as f32 / 60.0).min(1.0);
                let level = settled_ohms * (0.6 + 0.4 * progress);
                let gas = level * (1.0 + self.noise(noise_pct / 100.0));
                Sample::stable(gas, 40.0 + self.noise(2.0))
            })
            .collect()
    }

    /// Interleave an unstable reading after every stable one
    pub fn interleave_unstable(samples: &[Sample]) -> Vec<Sample> {
        samples
            .iter()
            .flat_map(|s| [*s, Sample::unstable(s.gas_resistance * 0.01, s.humidity)])
            .collect()
    }

    fn noise(&mut self, amplitude: f32) -> f32 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        let uniform = (self.seed as f32) / (u32::MAX as f32);
        (uniform - 0.5) * 2.0 * amplitude
    }
}

/// Reads scripted results in order, then reports end of stream
pub struct ScriptedSource {
    script: Vec<nb::Result<Sample, SensorError>>,
    position: usize,
}

impl ScriptedSource {
    pub fn new(script: Vec<nb::Result<Sample, SensorError>>) -> Self {
        Self {
            script,
            position: 0,
        }
    }

    pub fn reads(&self) -> usize {
        self.position
    }
}

impl SampleSource for ScriptedSource {
    fn read(&mut self) -> nb::Result<Sample, SensorError> {
        let next = self
            .script
            .get(self.position)
            .cloned()
            .unwrap_or(Err(nb::Error::Other(SensorError::EndOfStream)));
        self.position += 1;
        next
    }
}

/// Failure every scripted source can inject
pub const BUS_ERROR: SensorError = SensorError::Unavailable {
    reason: "I2C NACK",
};

pub fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

pub fn assert_close(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}
