//! Process-level phase machine
//!
//! Ties the calibrator and scorer together for callers that own the poll
//! loop (an async task, an RTOS timer, a `loop {}` with a delay):
//!
//! ```text
//! Uninitialized ──first step──▶ Calibrating ──window elapsed──▶ Scoring
//!                                    │                             │
//!                           no stable samples              (until cancelled)
//!                                    ▼
//!                        CalibrationError (fatal)
//! ```
//!
//! Each [`step`](AirQualityPipeline::step) performs at most one read. The
//! caller waits [`poll_interval_ms`](AirQualityPipeline::poll_interval_ms)
//! between steps, except right after [`Outcome::Calibrated`], where scoring
//! should start immediately.
//!
//! Cancellation needs no cooperation from the pipeline: dropping it between
//! steps discards the baseline and any in-flight result, and nothing is
//! persisted.

use crate::calibration::BaselineCalibrator;
use crate::config::AirQualityConfig;
use crate::constants::calibration::BASELINE_WINDOW;
use crate::errors::{CalibrationError, CalibrationResult, ConfigError, SensorError};
use crate::sample::{Baseline, Sample, ScoreResult};
use crate::scoring::AirQualityScorer;
use crate::source::SampleSource;
use crate::time::Timestamp;

/// Where the process is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Nothing read yet
    Uninitialized,
    /// Collecting burn-in readings
    Calibrating,
    /// Baseline fixed, scoring every stable reading
    Scoring,
}

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// The source had nothing new
    NoData,
    /// The read failed; this cycle is skipped
    Skipped(SensorError),
    /// Heater not stable; sample dropped
    Discarded(Sample),
    /// Stable burn-in reading added to the history
    Collected {
        /// The accepted reading
        sample: Sample,
        /// Stable readings accepted so far
        collected: usize,
    },
    /// Burn-in finished; no read was performed this step
    Calibrated(Baseline),
    /// Stable reading scored against the baseline
    Scored {
        /// The scored reading
        sample: Sample,
        /// Its score
        score: ScoreResult,
    },
    /// A finite source has no more samples
    EndOfStream,
}

enum State<const N: usize> {
    Uninitialized,
    Calibrating(BaselineCalibrator<N>),
    Scoring(AirQualityScorer),
}

/// Calibrate-then-score driver
pub struct AirQualityPipeline<const N: usize = BASELINE_WINDOW> {
    config: AirQualityConfig,
    state: State<N>,
}

impl AirQualityPipeline {
    /// Pipeline with the default 50-reading baseline window
    pub fn new(config: AirQualityConfig) -> Result<Self, ConfigError> {
        Self::with_window(config)
    }
}

impl<const N: usize> AirQualityPipeline<N> {
    /// Pipeline averaging the last `N` stable burn-in readings
    pub fn with_window(config: AirQualityConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: State::Uninitialized,
        })
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        match self.state {
            State::Uninitialized => Phase::Uninitialized,
            State::Calibrating(_) => Phase::Calibrating,
            State::Scoring(_) => Phase::Scoring,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &AirQualityConfig {
        &self.config
    }

    /// Baseline, once calibration has finished
    pub fn baseline(&self) -> Option<&Baseline> {
        match &self.state {
            State::Scoring(scorer) => Some(scorer.baseline()),
            _ => None,
        }
    }

    /// Calibrator state while burn-in is running
    pub fn calibrator(&self) -> Option<&BaselineCalibrator<N>> {
        match &self.state {
            State::Calibrating(calibrator) => Some(calibrator),
            _ => None,
        }
    }

    /// How long to wait before the next step
    pub fn poll_interval_ms(&self) -> u64 {
        match self.state {
            State::Scoring(_) => self.config.scoring_interval_ms,
            _ => self.config.calibration_interval_ms,
        }
    }

    /// Advance by one poll.
    ///
    /// Fails only when the burn-in window closes without a single stable
    /// reading; the pipeline is then left in the calibrating phase and must
    /// not be stepped again.
    pub fn step<S>(&mut self, source: &mut S, now: Timestamp) -> CalibrationResult<Outcome>
    where
        S: SampleSource + ?Sized,
    {
        if let State::Uninitialized = self.state {
            log_debug!("Burn-in started at t={}ms ({}s window)", now, self.config.burn_in_secs);
            self.state = State::Calibrating(BaselineCalibrator::with_window(self.config, now));
        }

        if let State::Calibrating(calibrator) = &self.state {
            if calibrator.is_window_elapsed(now) {
                let baseline = calibrator.baseline()?;
                // Config is already validated, so only the measured resistance can be rejected
                let scorer = AirQualityScorer::new(baseline, self.config).map_err(|_| {
                    CalibrationError::InvalidBaseline {
                        gas_baseline: baseline.gas_baseline,
                    }
                })?;
                log_info!(
                    "Gas baseline {} Ω from {} readings",
                    baseline.gas_baseline,
                    baseline.sample_count
                );
                self.state = State::Scoring(scorer);
                return Ok(Outcome::Calibrated(baseline));
            }
        }

        let sample = match source.read() {
            Ok(sample) => sample,
            Err(nb::Error::WouldBlock) => return Ok(Outcome::NoData),
            Err(nb::Error::Other(SensorError::EndOfStream)) => return Ok(Outcome::EndOfStream),
            Err(nb::Error::Other(error)) => return Ok(Outcome::Skipped(error)),
        };

        if !sample.is_stable {
            if let State::Calibrating(calibrator) = &mut self.state {
                calibrator.record(&sample);
            }
            return Ok(Outcome::Discarded(sample));
        }

        match &mut self.state {
            State::Calibrating(calibrator) => {
                calibrator.record(&sample);
                Ok(Outcome::Collected {
                    sample,
                    collected: calibrator.collected(),
                })
            }
            State::Scoring(scorer) => match scorer.score(&sample) {
                Some(score) => Ok(Outcome::Scored { sample, score }),
                None => Ok(Outcome::Discarded(sample)),
            },
            State::Uninitialized => Ok(Outcome::NoData),
        }
    }
}
