//! Memory-based sources for testing and replay
//!
//! Feed a known sequence of samples through the calibrator and scorer, one
//! per poll. Once the slice is exhausted every read reports
//! [`SensorError::EndOfStream`].

use super::SampleSource;
use crate::errors::SensorError;
use crate::sample::Sample;

/// Slice-backed sample source
///
/// ```rust
/// use airguard_core::{ReplaySource, Sample, SampleSource};
///
/// let samples = [
///     Sample::unstable(8_000.0, 40.0),
///     Sample::stable(52_000.0, 40.5),
/// ];
///
/// let mut source = ReplaySource::new(&samples);
/// while let Ok(_sample) = source.read() {
///     // Process sample
/// }
/// assert!(source.is_exhausted());
/// ```
#[derive(Debug, Clone)]
pub struct ReplaySource<'a> {
    samples: &'a [Sample],
    position: usize,
}

impl<'a> ReplaySource<'a> {
    /// Create new replay source from slice
    pub fn new(samples: &'a [Sample]) -> Self {
        Self {
            samples,
            position: 0,
        }
    }

    /// Reset to beginning
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Number of samples already read
    pub fn position(&self) -> usize {
        self.position
    }

    /// Samples left to read
    pub fn remaining(&self) -> usize {
        self.samples.len() - self.position
    }

    /// Check if source is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.samples.len()
    }
}

impl<'a> SampleSource for ReplaySource<'a> {
    fn read(&mut self) -> nb::Result<Sample, SensorError> {
        let sample = self
            .samples
            .get(self.position)
            .copied()
            .ok_or(nb::Error::Other(SensorError::EndOfStream))?;
        self.position += 1;
        Ok(sample)
    }
}
