//! Simulated BME680 for running without hardware
//!
//! The heater reports unstable readings for the first `warmup_reads`
//! polls, then the resistance climbs towards `settled_ohms` over roughly a
//! minute of reads. Occasional VOC events pull the resistance down for a
//! while, which makes the AQI move during a demo.
//!
//! All randomness comes from a seeded `StdRng`, so a given seed always
//! produces the same session.

use airguard_core::{Sample, SampleSource, SensorError};
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MonitorError, Result};

/// Reads until the resistance settles after warm-up
const SETTLE_READS: u32 = 60;

/// Simulation parameters
#[derive(Args, Debug, Clone)]
pub struct SimulationConfig {
    /// RNG seed
    #[arg(long, default_value_t = 0x5EED)]
    pub seed: u64,

    /// Unstable readings before the heater settles
    #[arg(long, default_value_t = 20)]
    pub warmup_reads: u32,

    /// Clean-air resistance (Ω)
    #[arg(long, default_value_t = 120_000.0)]
    pub settled_ohms: f32,

    /// Gas resistance jitter (percent)
    #[arg(long, default_value_t = 2.0)]
    pub noise_pct: f32,

    /// Chance of a failed read (0-1)
    #[arg(long, default_value_t = 0.0)]
    pub failure_rate: f64,

    /// Chance of a VOC event starting on any stable read (0-1)
    #[arg(long, default_value_t = 0.02)]
    pub event_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            warmup_reads: 20,
            settled_ohms: 120_000.0,
            noise_pct: 2.0,
            failure_rate: 0.0,
            event_rate: 0.02,
        }
    }
}

/// Pseudo-random BME680 readings
pub struct SimulatedSource {
    config: SimulationConfig,
    rng: StdRng,
    reads: u32,
    /// Remaining reads of the current VOC event and its depth
    event: Option<(u32, f32)>,
}

impl SimulatedSource {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        for (name, p) in [
            ("failure_rate", config.failure_rate),
            ("event_rate", config.event_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(MonitorError::Simulation(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        if !(config.settled_ohms.is_finite() && config.settled_ohms > 0.0) {
            return Err(MonitorError::Simulation(format!(
                "settled_ohms must be positive, got {}",
                config.settled_ohms
            )));
        }
        if !(config.noise_pct.is_finite() && config.noise_pct >= 0.0) {
            return Err(MonitorError::Simulation(format!(
                "noise_pct must be non-negative, got {}",
                config.noise_pct
            )));
        }

        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            reads: 0,
            event: None,
        })
    }

    /// Reads attempted so far
    pub fn reads(&self) -> u32 {
        self.reads
    }

    fn jitter(&mut self, amplitude: f32) -> f32 {
        if amplitude == 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-amplitude..=amplitude)
    }

    fn event_factor(&mut self) -> f32 {
        match self.event {
            Some((remaining, depth)) => {
                self.event = remaining.checked_sub(1).map(|left| (left, depth));
                depth
            }
            None => {
                if self.rng.gen_bool(self.config.event_rate) {
                    let duration = self.rng.gen_range(3..=12);
                    let depth = self.rng.gen_range(0.2..0.7);
                    self.event = Some((duration, depth));
                    depth
                } else {
                    1.0
                }
            }
        }
    }
}

impl SampleSource for SimulatedSource {
    fn read(&mut self) -> nb::Result<Sample, SensorError> {
        self.reads += 1;

        if self.rng.gen_bool(self.config.failure_rate) {
            return Err(nb::Error::Other(SensorError::Unavailable {
                reason: "Simulated bus error",
            }));
        }

        let temperature = 22.0 + self.jitter(0.3);
        let pressure = 1013.25 + self.jitter(0.5);
        let humidity = 40.0 + self.jitter(3.0);

        if self.reads <= self.config.warmup_reads {
            let cold = self.config.settled_ohms * 0.05;
            return Ok(Sample::unstable(cold, humidity));
        }

        let settling = (self.reads - self.config.warmup_reads) as f32 / SETTLE_READS as f32;
        let level = self.config.settled_ohms * (0.6 + 0.4 * settling.min(1.0));
        let noise = 1.0 + self.jitter(self.config.noise_pct / 100.0);
        let gas = level * noise * self.event_factor();

        Ok(Sample::new(gas, humidity, temperature, pressure, true))
    }
}
