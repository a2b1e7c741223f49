//! Console output
//!
//! Human-readable text, one block per scored sample:
//!
//! ```text
//!
//! Time: 2024-05-01 14:03:22
//! Temperature: 22.41 °C
//! Pressure: 1008.32 hPa
//! Humidity: 38.20 %
//! Gas Resistance: 118342.7 Ohms -> AQI: 458
//! Estimated CO2: 2324.00 ppm
//! Estimated TVOC: 915.48 ppb
//! ----------------------------------------
//! ```
//!
//! Diagnostics go through `tracing`; only the report itself is written here.

use std::fmt;
use std::io::{self, Write};

use airguard_core::{Baseline, Sample, ScoreResult};
use chrono::NaiveDateTime;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes the user-facing report stream
pub struct Reporter<W> {
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Greeting printed once at startup
    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "airguard-monitor - Displays temperature, pressure, humidity, gas resistance, and estimates air quality.\n"
        )?;
        writeln!(self.out, "Press Ctrl+C to exit!\n")
    }

    pub fn burn_in_started(&mut self, burn_in_secs: u64) -> io::Result<()> {
        writeln!(
            self.out,
            "Collecting gas resistance burn-in data for {}\n",
            BurnInLength(burn_in_secs)
        )
    }

    /// One line per stable burn-in reading
    pub fn burn_in_progress(&mut self, sample: &Sample) -> io::Result<()> {
        writeln!(self.out, "Gas: {} Ohms", sample.gas_resistance)
    }

    pub fn baseline(&mut self, baseline: &Baseline) -> io::Result<()> {
        writeln!(
            self.out,
            "Gas baseline: {} Ohms, humidity baseline: {:.2} %RH\n",
            baseline.gas_baseline, baseline.hum_baseline
        )
    }

    pub fn report(
        &mut self,
        at: NaiveDateTime,
        sample: &Sample,
        score: &ScoreResult,
    ) -> io::Result<()> {
        writeln!(self.out, "\nTime: {}", at.format(TIMESTAMP_FORMAT))?;
        writeln!(self.out, "Temperature: {:.2} °C", sample.temperature)?;
        writeln!(self.out, "Pressure: {:.2} hPa", sample.pressure)?;
        writeln!(self.out, "Humidity: {:.2} %", sample.humidity)?;
        writeln!(
            self.out,
            "Gas Resistance: {} Ohms -> AQI: {}",
            sample.gas_resistance, score.aqi_value
        )?;
        writeln!(self.out, "Estimated CO2: {:.2} ppm", score.estimated_co2_ppm)?;
        writeln!(self.out, "Estimated TVOC: {:.2} ppb", score.estimated_tvoc_ppb)?;
        writeln!(self.out, "{}", "-".repeat(40))?;
        self.out.flush()
    }

    pub fn summary(&mut self, stats: &SessionStats) -> io::Result<()> {
        writeln!(self.out, "\n{}", stats)?;
        self.out.flush()
    }

    pub fn exiting(&mut self) -> io::Result<()> {
        writeln!(self.out, "Exiting...")?;
        self.out.flush()
    }
}

/// "5 mins", "90 secs"
struct BurnInLength(u64);

impl fmt::Display for BurnInLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => write!(f, "1 sec"),
            60 => write!(f, "1 min"),
            secs if secs % 60 == 0 => write!(f, "{} mins", secs / 60),
            secs => write!(f, "{} secs", secs),
        }
    }
}

/// Counters for one monitoring session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Stable burn-in readings
    pub collected: usize,
    /// Unstable readings, in either phase
    pub discarded: usize,
    /// Failed reads
    pub skipped: usize,
    /// Reports written
    pub scored: usize,
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Session: {} burn-in readings, {} scored, {} unstable, {} failed reads",
            self.collected, self.scored, self.discarded, self.skipped
        )
    }
}
