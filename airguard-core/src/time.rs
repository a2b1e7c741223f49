//! Time sources for burn-in deadlines and poll pacing
//!
//! The calibrator only needs two things from the platform: a millisecond
//! counter to measure the burn-in window, and a way to wait for the next
//! poll. [`TimeSource`] covers the first, [`Clock`] adds the second.
//!
//! - [`FixedTime`]: manual clock for tests and accelerated replay; sleeping
//!   advances it instantly
//! - [`MonotonicTime`] (std): `Instant`-based, sleeps the calling thread

/// Timestamp in milliseconds since an arbitrary epoch (boot, process start)
pub type Timestamp = u64;

/// Source of time for the system
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Milliseconds elapsed since `earlier`, zero if time went backwards
    fn elapsed_since(&self, earlier: Timestamp) -> u64 {
        self.now().saturating_sub(earlier)
    }
}

/// Time source that can also suspend the caller until the next poll
pub trait Clock: TimeSource {
    /// Block for `ms` milliseconds
    fn sleep_ms(&mut self, ms: u64);
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Clock reading `timestamp` until moved
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Jump to `timestamp`, backwards included
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move forward by `ms`
    pub fn advance(&mut self, ms: u64) {
        self.timestamp = self.timestamp.saturating_add(ms);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

impl Clock for FixedTime {
    fn sleep_ms(&mut self, ms: u64) {
        self.advance(ms);
    }
}

/// Monotonic time since construction (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct MonotonicTime {
    start: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicTime {
    /// Start counting from now
    pub fn new() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicTime {
    fn now(&self) -> Timestamp {
        self.start.elapsed().as_millis() as Timestamp
    }
}

#[cfg(feature = "std")]
impl Clock for MonotonicTime {
    fn sleep_ms(&mut self, ms: u64) {
        std::thread::sleep(std::time::Duration::from_millis(ms));
    }
}
