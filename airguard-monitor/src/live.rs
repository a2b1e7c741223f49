//! Real-time reporting loop
//!
//! Drives an [`AirQualityPipeline`] from a tokio timer. Between polls the
//! task waits on whichever comes first, the next tick or the shutdown
//! future, so an interrupt takes effect at the next poll boundary and
//! never in the middle of a report.
//!
//! ```text
//!   ┌──────────── sleep(poll_interval) ◀──────────┐
//!   ▼                                             │
//! select! ──shutdown──▶ "Exiting..."              │
//!   │                                             │
//!   └──tick──▶ pipeline.step() ──▶ Reporter ──────┘
//! ```

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use airguard_core::{AirQualityConfig, AirQualityPipeline, Outcome, SampleSource, TimeSource};
use chrono::Local;
use tracing::{debug, info, trace, warn};

use crate::error::Result;
use crate::report::{Reporter, SessionStats};

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Shutdown future completed
    Interrupted,
    /// Finite source ran dry
    SourceExhausted,
}

/// Result of a live session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveSummary {
    pub stop: StopReason,
    pub stats: SessionStats,
}

/// Calibrate, then report on every stable sample until `shutdown` resolves
/// or the source ends.
///
/// `time` stamps each step; it should follow the same clock as the tokio
/// timer. A burn-in without a single stable reading is returned as an error.
pub async fn run<S, T, W, F>(
    config: AirQualityConfig,
    source: &mut S,
    time: &T,
    reporter: &mut Reporter<W>,
    shutdown: F,
) -> Result<LiveSummary>
where
    S: SampleSource,
    T: TimeSource,
    W: Write,
    F: Future<Output = ()>,
{
    let mut pipeline = AirQualityPipeline::new(config)?;
    let mut stats = SessionStats::default();
    let mut delay = Duration::ZERO;

    reporter.burn_in_started(pipeline.config().burn_in_secs)?;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Shutdown requested");
                reporter.exiting()?;
                return Ok(LiveSummary { stop: StopReason::Interrupted, stats });
            }
            _ = tokio::time::sleep(delay) => {}
        }

        let now = time.now();
        let outcome = pipeline.step(source, now)?;
        delay = Duration::from_millis(pipeline.poll_interval_ms());

        match outcome {
            Outcome::Collected { sample, collected } => {
                stats.collected += 1;
                let remaining_ms = pipeline.calibrator().map_or(0, |c| c.remaining_ms(now));
                trace!(collected, remaining_ms, "Burn-in reading accepted");
                reporter.burn_in_progress(&sample)?;
            }
            Outcome::Calibrated(baseline) => {
                reporter.baseline(&baseline)?;
                // First scoring read happens right away
                delay = Duration::ZERO;
            }
            Outcome::Scored { sample, score } => {
                stats.scored += 1;
                debug!(
                    score = score.air_quality_score,
                    hum_score = score.hum_score,
                    gas_score = score.gas_score,
                    "Sample scored"
                );
                reporter.report(Local::now().naive_local(), &sample, &score)?;
            }
            Outcome::Discarded(sample) => {
                stats.discarded += 1;
                trace!(gas = sample.gas_resistance, "Heater not stable, reading dropped");
            }
            Outcome::Skipped(error) => {
                stats.skipped += 1;
                warn!("Skipping cycle: {}", error);
            }
            Outcome::NoData => trace!("No fresh reading"),
            Outcome::EndOfStream => {
                info!("Sample source exhausted");
                return Ok(LiveSummary {
                    stop: StopReason::SourceExhausted,
                    stats,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonitorError;
    use crate::simulated::{SimulatedSource, SimulationConfig};
    use airguard_core::{CalibrationError, ReplaySource, Sample, Timestamp};
    use tokio::time::Instant;

    /// Milliseconds on tokio's clock, which stays put while paused
    struct LoopTime {
        origin: Instant,
    }

    impl LoopTime {
        fn start() -> Self {
            Self {
                origin: Instant::now(),
            }
        }
    }

    impl TimeSource for LoopTime {
        fn now(&self) -> Timestamp {
            self.origin.elapsed().as_millis() as Timestamp
        }
    }

    fn output(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn finite_source_runs_to_completion() {
        let samples = [Sample::stable(60_000.0, 40.0); 10];
        let mut source = ReplaySource::new(&samples);
        let mut reporter = Reporter::new(Vec::new());
        let config = AirQualityConfig::default().with_burn_in_secs(3);

        let summary = run(
            config,
            &mut source,
            &LoopTime::start(),
            &mut reporter,
            std::future::pending(),
        )
        .await
        .unwrap();

        assert_eq!(summary.stop, StopReason::SourceExhausted);
        assert_eq!(summary.stats.collected, 3);
        assert_eq!(summary.stats.scored, 7);

        let text = output(reporter);
        assert_eq!(text.matches("Gas: 60000 Ohms").count(), 3);
        assert!(text.contains("Gas baseline: 60000 Ohms, humidity baseline: 40.00 %RH"));
        assert_eq!(text.matches("-> AQI:").count(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn interrupt_stops_at_poll_boundary() {
        let mut source = SimulatedSource::new(SimulationConfig {
            warmup_reads: 0,
            event_rate: 0.0,
            ..Default::default()
        })
        .unwrap();
        let mut reporter = Reporter::new(Vec::new());
        let shutdown = tokio::time::sleep(Duration::from_millis(2_500));

        let summary = run(
            AirQualityConfig::default(),
            &mut source,
            &LoopTime::start(),
            &mut reporter,
            shutdown,
        )
        .await
        .unwrap();

        assert_eq!(summary.stop, StopReason::Interrupted);
        assert_eq!(summary.stats.collected, 3);
        assert_eq!(source.reads(), 3);
        assert!(output(reporter).ends_with("Exiting...\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_reads_do_not_stop_scoring() {
        let mut source = SimulatedSource::new(SimulationConfig {
            warmup_reads: 0,
            event_rate: 0.0,
            failure_rate: 0.5,
            ..Default::default()
        })
        .unwrap();
        let mut reporter = Reporter::new(Vec::new());
        let config = AirQualityConfig::default().with_burn_in_secs(10);
        let shutdown = tokio::time::sleep(Duration::from_secs(10 + 5 * 40));

        let summary = run(config, &mut source, &LoopTime::start(), &mut reporter, shutdown)
            .await
            .unwrap();

        assert_eq!(summary.stop, StopReason::Interrupted);
        assert!(summary.stats.skipped > 0);
        assert!(summary.stats.scored > 0);
        assert_eq!(
            summary.stats.collected + summary.stats.scored + summary.stats.skipped,
            source.reads() as usize
        );
    }

    /// Runs a fixed multiple faster than tokio's clock
    struct FastTime {
        inner: LoopTime,
        factor: Timestamp,
    }

    impl TimeSource for FastTime {
        fn now(&self) -> Timestamp {
            self.inner.now() * self.factor
        }
    }

    #[tokio::test(start_paused = true)]
    async fn burn_in_window_follows_supplied_clock() {
        let samples = [Sample::stable(60_000.0, 40.0); 12];
        let mut source = ReplaySource::new(&samples);
        let mut reporter = Reporter::new(Vec::new());
        let config = AirQualityConfig::default().with_burn_in_secs(10);
        let time = FastTime {
            inner: LoopTime::start(),
            factor: 3,
        };

        let summary = run(config, &mut source, &time, &mut reporter, std::future::pending())
            .await
            .unwrap();

        // Reads at 0, 3, 6 and 9 s of supplied time, baseline at 12 s
        assert_eq!(summary.stats.collected, 4);
        assert_eq!(summary.stats.scored, 8);
        let text = output(reporter);
        assert!(text.starts_with("Collecting gas resistance burn-in data for 10 secs\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn unstable_burn_in_is_an_error() {
        let samples = [Sample::unstable(5_000.0, 40.0); 10];
        let mut source = ReplaySource::new(&samples);
        let mut reporter = Reporter::new(Vec::new());
        let config = AirQualityConfig::default().with_burn_in_secs(5);

        let result = run(
            config,
            &mut source,
            &LoopTime::start(),
            &mut reporter,
            std::future::pending(),
        )
        .await;

        assert!(matches!(
            result,
            Err(MonitorError::Calibration(CalibrationError::InsufficientData { window_secs: 5 }))
        ));
    }
}
