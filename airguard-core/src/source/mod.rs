//! Sample sources
//!
//! The sensor driver is an external collaborator. Everything the core needs
//! from it is captured by [`SampleSource`], a pull-based trait built on
//! `nb::Result` so it works the same on a bare-metal I2C driver and on a
//! host-side replay.
//!
//! ## Read Outcomes
//!
//! | Result                                        | Meaning                          |
//! |-----------------------------------------------|----------------------------------|
//! | `Ok(sample)`                                  | fresh reading (may be unstable)  |
//! | `Err(nb::Error::WouldBlock)`                  | no new reading this poll         |
//! | `Err(nb::Error::Other(SensorError::Unavailable))` | read failed, skip the cycle  |
//! | `Err(nb::Error::Other(SensorError::EndOfStream))` | finite source exhausted      |
//!
//! ## Module Organization
//!
//! - `memory` - slice-backed replay for tests and simulations
//! - `file` - CSV recordings (requires `std`)

pub mod memory;

#[cfg(feature = "std")]
pub mod file;

pub use memory::ReplaySource;

#[cfg(feature = "std")]
pub use file::{CsvSource, CsvSourceStats};

use crate::errors::SensorError;
use crate::sample::Sample;

/// Pull-based access to a gas sensor.
///
/// Callers poll at most once per poll interval; implementations return the
/// most recent measurement.
///
/// ## Example Implementation
///
/// ```rust
/// use airguard_core::{Sample, SampleSource, SensorError};
///
/// struct Bme680Driver {
///     // ... I2C bus handle
/// }
///
/// impl Bme680Driver {
///     fn measure(&mut self) -> Result<Option<Sample>, ()> {
///         Ok(Some(Sample::stable(120_000.0, 41.5)))
///     }
/// }
///
/// impl SampleSource for Bme680Driver {
///     fn read(&mut self) -> nb::Result<Sample, SensorError> {
///         match self.measure() {
///             Ok(Some(sample)) => Ok(sample),
///             Ok(None) => Err(nb::Error::WouldBlock),
///             Err(()) => Err(nb::Error::Other(SensorError::Unavailable {
///                 reason: "I2C transfer failed",
///             })),
///         }
///     }
/// }
/// ```
pub trait SampleSource {
    /// Read the most recent sample
    fn read(&mut self) -> nb::Result<Sample, SensorError>;
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    fn read(&mut self) -> nb::Result<Sample, SensorError> {
        (**self).read()
    }
}

#[cfg(feature = "std")]
impl<S: SampleSource + ?Sized> SampleSource for std::boxed::Box<S> {
    fn read(&mut self) -> nb::Result<Sample, SensorError> {
        (**self).read()
    }
}
