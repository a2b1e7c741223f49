//! Integration tests for burn-in calibration
//!
//! Drives the pull-based calibrator with generated sessions and a manual
//! clock, covering unstable readings, short windows, failed reads and
//! exhausted sources.

mod common;

use airguard_core::{
    AirQualityConfig, BaselineCalibrator, CalibrationError, FixedTime, ReplaySource, Sample,
    TimeSource,
};
use proptest::prelude::*;

use common::{assert_close, mean, ScriptedSource, SessionGenerator, BUS_ERROR};

#[test]
fn realistic_burn_in() {
    let mut generator = SessionGenerator::new(42);
    let session = generator.burn_in(300, 20, 120_000.0, 1.0);

    let mut source = ReplaySource::new(&session);
    let mut clock = FixedTime::new(0);
    let baseline =
        BaselineCalibrator::calibrate(AirQualityConfig::default(), &mut source, &mut clock)
            .unwrap();

    // Last 50 readings are fully settled
    let stable_tail: Vec<f32> = session[250..].iter().map(|s| s.gas_resistance).collect();
    assert_close(baseline.gas_baseline, mean(&stable_tail), 1.0);
    assert_close(baseline.gas_baseline, 120_000.0, 1_500.0);
    assert_eq!(baseline.sample_count, 50);
}

#[test]
fn interleaved_unstable_readings_change_nothing() {
    let mut generator = SessionGenerator::new(7);
    let stable = generator.burn_in(80, 0, 90_000.0, 2.0);
    let mixed = SessionGenerator::interleave_unstable(&stable);

    let mut direct = BaselineCalibrator::new(AirQualityConfig::default(), 0);
    for sample in &stable {
        direct.record(sample);
    }

    let mut filtered = BaselineCalibrator::new(AirQualityConfig::default(), 0);
    for sample in &mixed {
        filtered.record(sample);
    }

    assert_eq!(filtered.discarded(), stable.len());
    assert_eq!(direct.finish(), filtered.finish());
}

#[test]
fn failed_reads_are_skipped() {
    let script = vec![
        Err(nb::Error::Other(BUS_ERROR)),
        Ok(Sample::stable(40_000.0, 40.0)),
        Err(nb::Error::WouldBlock),
        Ok(Sample::unstable(1_000.0, 40.0)),
        Ok(Sample::stable(60_000.0, 40.0)),
    ];
    let mut source = ScriptedSource::new(script);
    let mut clock = FixedTime::new(0);
    let config = AirQualityConfig::default().with_burn_in_secs(5);

    let baseline = BaselineCalibrator::calibrate(config, &mut source, &mut clock).unwrap();

    assert_eq!(source.reads(), 5);
    assert_eq!(baseline.gas_baseline, 50_000.0);
    assert_eq!(baseline.sample_count, 2);
}

#[test]
fn silent_sensor_ends_at_deadline() {
    let script = (0..100).map(|_| Err(nb::Error::WouldBlock)).collect();
    let mut source = ScriptedSource::new(script);
    let mut clock = FixedTime::new(10_000);
    let config = AirQualityConfig::default().with_burn_in_secs(30);

    let result = BaselineCalibrator::calibrate(config, &mut source, &mut clock);

    assert_eq!(result, Err(CalibrationError::InsufficientData { window_secs: 30 }));
    assert_eq!(clock.now(), 40_000);
    assert_eq!(source.reads(), 30);
}

#[test]
fn slower_poll_interval_collects_fewer_readings() {
    let session = vec![Sample::stable(25_000.0, 40.0); 300];
    let mut source = ReplaySource::new(&session);
    let mut clock = FixedTime::new(0);
    let config = AirQualityConfig::default()
        .with_burn_in_secs(60)
        .with_calibration_interval_ms(2_000);

    let baseline = BaselineCalibrator::calibrate(config, &mut source, &mut clock).unwrap();
    assert_eq!(baseline.sample_count, 30);
    assert_eq!(source.position(), 30);
}

proptest! {
    #[test]
    fn baseline_is_mean_of_last_fifty(values in prop::collection::vec(1.0f32..2_000_000.0, 1..200)) {
        let mut calibrator = BaselineCalibrator::new(AirQualityConfig::default(), 0);
        for value in &values {
            calibrator.record(&Sample::stable(*value, 40.0));
        }

        let tail = &values[values.len().saturating_sub(50)..];
        let baseline = calibrator.finish().unwrap();

        prop_assert_eq!(baseline.sample_count, tail.len());
        let expected = mean(tail);
        prop_assert!((baseline.gas_baseline - expected).abs() <= expected * 1e-4);
    }

    #[test]
    fn unstable_readings_never_affect_baseline(
        readings in prop::collection::vec((1.0f32..2_000_000.0, any::<bool>()), 1..200)
    ) {
        let mut mixed = BaselineCalibrator::new(AirQualityConfig::default(), 0);
        let mut stable_only = BaselineCalibrator::new(AirQualityConfig::default(), 0);

        for (gas, is_stable) in &readings {
            let sample = Sample::new(*gas, 40.0, 21.0, 1013.0, *is_stable);
            mixed.record(&sample);
            if *is_stable {
                stable_only.record(&sample);
            }
        }

        prop_assert_eq!(mixed.finish(), stable_only.finish());
    }
}
