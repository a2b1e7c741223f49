//! Offline replay of a recorded session
//!
//! Runs the same burn-in and scoring as the live loop against a recording,
//! on a manual clock so a 5 minute burn-in finishes instantly. One recorded
//! line is consumed per poll, and report timestamps are `start` plus the
//! simulated elapsed time.

use std::io::Write;

use airguard_core::{
    AirQualityConfig, AirQualityScorer, BaselineCalibrator, Clock, FixedTime, Sample,
    SampleSource, SensorError, TimeSource,
};
use chrono::{Duration, NaiveDateTime};
use tracing::{info, warn};

use crate::error::Result;
use crate::report::{Reporter, SessionStats};

/// Replay `source` to the end, writing reports as if it were live
pub fn replay<S, W>(
    config: AirQualityConfig,
    source: &mut S,
    reporter: &mut Reporter<W>,
    start: NaiveDateTime,
) -> Result<SessionStats>
where
    S: SampleSource,
    W: Write,
{
    config.validate()?;
    let mut source = UnstableCounter {
        inner: source,
        unstable: 0,
    };
    let mut clock = FixedTime::new(0);
    let mut stats = SessionStats::default();

    reporter.burn_in_started(config.burn_in_secs)?;

    let mut progress = Ok(());
    let baseline =
        BaselineCalibrator::calibrate_observed(config, &mut source, &mut clock, |sample| {
            stats.collected += 1;
            if progress.is_ok() {
                progress = reporter.burn_in_progress(sample);
            }
        })?;
    progress?;

    info!(
        gas_baseline = baseline.gas_baseline,
        readings = baseline.sample_count,
        "Burn-in complete after {}ms of recording",
        clock.now()
    );
    reporter.baseline(&baseline)?;

    let scorer = AirQualityScorer::new(baseline, config)?;
    loop {
        match source.read() {
            Ok(sample) => {
                if let Some(score) = scorer.score(&sample) {
                    stats.scored += 1;
                    reporter.report(timestamp(start, clock.now()), &sample, &score)?;
                }
            }
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(SensorError::EndOfStream)) => break,
            Err(nb::Error::Other(error)) => {
                stats.skipped += 1;
                warn!("Skipping cycle: {}", error);
            }
        }
        clock.sleep_ms(scorer.config().scoring_interval_ms);
    }

    stats.discarded = source.unstable;
    Ok(stats)
}

/// Counts readings taken before the heater was stable
struct UnstableCounter<'a, S: ?Sized> {
    inner: &'a mut S,
    unstable: usize,
}

impl<S: SampleSource + ?Sized> SampleSource for UnstableCounter<'_, S> {
    fn read(&mut self) -> nb::Result<Sample, SensorError> {
        let result = self.inner.read();
        if matches!(result, Ok(ref sample) if !sample.is_stable) {
            self.unstable += 1;
        }
        result
    }
}

fn timestamp(start: NaiveDateTime, elapsed_ms: u64) -> NaiveDateTime {
    i64::try_from(elapsed_ms)
        .ok()
        .and_then(|ms| start.checked_add_signed(Duration::milliseconds(ms)))
        .unwrap_or(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonitorError;
    use airguard_core::{CalibrationError, ReplaySource};
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn reports_each_stable_sample_after_burn_in() {
        let mut samples = vec![Sample::unstable(1_000.0, 40.0); 2];
        samples.extend([Sample::stable(40_000.0, 40.0); 3]);
        samples.push(Sample::stable(20_000.0, 40.0));
        samples.push(Sample::unstable(20_000.0, 40.0));
        samples.push(Sample::stable(40_000.0, 40.0));

        let mut source = ReplaySource::new(&samples);
        let mut reporter = Reporter::new(Vec::new());
        let config = AirQualityConfig::default().with_burn_in_secs(5);

        let stats = replay(config, &mut source, &mut reporter, start()).unwrap();

        assert_eq!(
            stats,
            SessionStats {
                collected: 3,
                discarded: 3,
                skipped: 0,
                scored: 2,
            }
        );

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("Gas baseline: 40000 Ohms"));
        // Scoring begins at the end of the 5 s window, one poll per 5 s
        assert!(text.contains("Time: 2024-01-01 08:00:05"));
        assert!(text.contains("Time: 2024-01-01 08:00:15"));
    }

    #[test]
    fn scoring_rows_are_spaced_by_scoring_interval() {
        let samples = [Sample::stable(40_000.0, 40.0); 7];
        let mut source = ReplaySource::new(&samples);
        let mut reporter = Reporter::new(Vec::new());
        let config = AirQualityConfig::default()
            .with_burn_in_secs(5)
            .with_scoring_interval_ms(2_000);

        let stats = replay(config, &mut source, &mut reporter, start()).unwrap();
        assert_eq!(stats.collected, 5);
        assert_eq!(stats.scored, 2);

        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.contains("Time: 2024-01-01 08:00:05"));
        assert!(text.contains("Time: 2024-01-01 08:00:07"));
        assert!(!text.contains("Time: 2024-01-01 08:00:10"));
    }

    #[test]
    fn recording_without_stable_burn_in_fails() {
        let samples = [Sample::unstable(1_000.0, 40.0); 3];
        let mut source = ReplaySource::new(&samples);
        let mut reporter = Reporter::new(Vec::new());

        let result = replay(AirQualityConfig::default(), &mut source, &mut reporter, start());
        assert!(matches!(
            result,
            Err(MonitorError::Calibration(CalibrationError::InsufficientData { .. }))
        ));
    }

    #[test]
    fn timestamps_follow_simulated_clock() {
        assert_eq!(
            timestamp(start(), 90_000).format("%H:%M:%S").to_string(),
            "08:01:30"
        );
        assert_eq!(timestamp(start(), u64::MAX), start());
    }
}
