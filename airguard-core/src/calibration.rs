//! Burn-in Calibration of the Gas Resistance Baseline
//!
//! ## Background
//!
//! A metal-oxide gas sensor reports a resistance that falls as reducing gases
//! (VOCs, CO, alcohols) rise. The absolute value varies wildly between parts
//! and drifts with age, so readings are only meaningful relative to a
//! baseline taken in known conditions. The baseline here is the mean
//! resistance over the tail of a warm-up window:
//!
//! ```text
//!  Ω
//!  │            ..─────────────────────────
//!  │         .─'                  └─ last 50 stable readings ─┘
//!  │      .-'
//!  │   .-'   heater settling
//!  │ .'
//!  └──────────────────────────────────────────▶ t
//!   0                                      burn_in_secs
//! ```
//!
//! ## Algorithm
//!
//! 1. Poll once per `calibration_interval_ms`.
//! 2. Drop every sample whose heater was not stable.
//! 3. Keep the most recent `N` stable resistances in a ring buffer.
//! 4. When `burn_in_secs` have elapsed, average whatever the buffer holds.
//!
//! Fewer than `N` readings are averaged over the actual count. No readings at
//! all is [`CalibrationError::InsufficientData`].
//!
//! ## Memory
//!
//! The ring buffer is a `heapless::HistoryBuffer<f32, N>`: `4 * N` bytes
//! regardless of burn-in length.
//!
//! ## Usage
//!
//! ```rust
//! use airguard_core::{AirQualityConfig, BaselineCalibrator, FixedTime, ReplaySource, Sample};
//!
//! let config = AirQualityConfig::default().with_burn_in_secs(5);
//! let samples = [Sample::stable(48_000.0, 40.0); 10];
//!
//! let mut source = ReplaySource::new(&samples);
//! let mut clock = FixedTime::new(0);
//!
//! let baseline = BaselineCalibrator::calibrate(config, &mut source, &mut clock)?;
//! assert_eq!(baseline.gas_baseline, 48_000.0);
//! assert_eq!(baseline.sample_count, 5);
//! # Ok::<(), airguard_core::CalibrationError>(())
//! ```

use heapless::HistoryBuffer;

use crate::config::AirQualityConfig;
use crate::constants::calibration::BASELINE_WINDOW;
use crate::errors::{CalibrationError, CalibrationResult, SensorError};
use crate::sample::{Baseline, Sample};
use crate::source::SampleSource;
use crate::time::{Clock, Timestamp};

/// Collects burn-in readings and produces the gas [`Baseline`].
///
/// `N` is the number of most recent stable readings averaged.
#[derive(Clone)]
pub struct BaselineCalibrator<const N: usize = BASELINE_WINDOW> {
    config: AirQualityConfig,
    started_at: Timestamp,
    history: HistoryBuffer<f32, N>,
    collected: usize,
    discarded: usize,
}

impl BaselineCalibrator {
    /// Calibrator averaging the last 50 stable readings
    pub fn new(config: AirQualityConfig, started_at: Timestamp) -> Self {
        Self::with_window(config, started_at)
    }

    /// Run a complete burn-in against `source`, pacing reads with `clock`.
    pub fn calibrate<S, C>(
        config: AirQualityConfig,
        source: &mut S,
        clock: &mut C,
    ) -> CalibrationResult<Baseline>
    where
        S: SampleSource + ?Sized,
        C: Clock + ?Sized,
    {
        Self::calibrate_observed(config, source, clock, |_| {})
    }

    /// Like [`calibrate`](Self::calibrate), calling `on_stable` with each
    /// reading that enters the history (progress display).
    pub fn calibrate_observed<S, C, F>(
        config: AirQualityConfig,
        source: &mut S,
        clock: &mut C,
        on_stable: F,
    ) -> CalibrationResult<Baseline>
    where
        S: SampleSource + ?Sized,
        C: Clock + ?Sized,
        F: FnMut(&Sample),
    {
        let mut calibrator = Self::new(config, clock.now());
        calibrator.run(source, clock, on_stable);
        calibrator.finish()
    }
}

impl<const N: usize> BaselineCalibrator<N> {
    /// Calibrator averaging the last `N` stable readings
    pub fn with_window(config: AirQualityConfig, started_at: Timestamp) -> Self {
        Self {
            config,
            started_at,
            history: HistoryBuffer::new(),
            collected: 0,
            discarded: 0,
        }
    }

    /// Offer one sample. Returns `true` if it entered the history.
    pub fn record(&mut self, sample: &Sample) -> bool {
        if !sample.is_stable {
            self.discarded += 1;
            return false;
        }

        self.history.write(sample.gas_resistance);
        self.collected += 1;
        true
    }

    /// Whether the burn-in window is over at `now`
    pub fn is_window_elapsed(&self, now: Timestamp) -> bool {
        now.saturating_sub(self.started_at) >= self.config.burn_in_ms()
    }

    /// Milliseconds of burn-in left at `now`
    pub fn remaining_ms(&self, now: Timestamp) -> u64 {
        self.config
            .burn_in_ms()
            .saturating_sub(now.saturating_sub(self.started_at))
    }

    /// When the window started
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// Stable readings accepted so far (including ones rotated out)
    pub fn collected(&self) -> usize {
        self.collected
    }

    /// Unstable readings dropped so far
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Readings currently in the averaging window (at most `N`)
    pub fn window_len(&self) -> usize {
        self.history.len()
    }

    /// Baseline from the readings collected so far
    pub fn baseline(&self) -> CalibrationResult<Baseline> {
        let count = self.history.len();
        if count == 0 {
            return Err(CalibrationError::InsufficientData {
                window_secs: self.config.burn_in_secs,
            });
        }

        let sum: f32 = self.history.as_slice().iter().sum();
        Ok(Baseline::new(sum / count as f32, count, &self.config))
    }

    /// Close the window and produce the baseline
    pub fn finish(self) -> CalibrationResult<Baseline> {
        self.baseline()
    }

    /// Pull samples until the window elapses or the source ends
    fn run<S, C, F>(&mut self, source: &mut S, clock: &mut C, mut on_stable: F)
    where
        S: SampleSource + ?Sized,
        C: Clock + ?Sized,
        F: FnMut(&Sample),
    {
        // A zero interval would never advance a manual clock
        let interval = self.config.calibration_interval_ms.max(1);

        while !self.is_window_elapsed(clock.now()) {
            match source.read() {
                Ok(sample) => {
                    if self.record(&sample) {
                        on_stable(&sample);
                    }
                }
                Err(nb::Error::WouldBlock) => {}
                Err(nb::Error::Other(SensorError::Unavailable { .. })) => {}
                Err(nb::Error::Other(SensorError::EndOfStream)) => break,
            }

            clock.sleep_ms(interval);
        }
    }
}
