//! CSV recordings of sensor output
//!
//! Lets a session captured on the device be replayed on a host.
//!
//! ## Format
//!
//! ```csv
//! temperature,pressure,humidity,gas_resistance,heat_stable
//! 22.41,1008.32,38.20,118342.7,true
//! 22.43,1008.30,38.25,118951.0,1
//! ```
//!
//! - The header line is optional; if the first line that is neither blank
//!   nor a comment has a non-numeric first field, it is skipped.
//! - `heat_stable` accepts `true`/`false`/`1`/`0` (case-insensitive).
//! - Blank lines and lines starting with `#` are ignored.
//! - A malformed line is counted, logged, and reported as
//!   [`SensorError::Unavailable`] so the consumer skips one cycle.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::SampleSource;
use crate::errors::SensorError;
use crate::sample::Sample;

/// Statistics for CSV streaming
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CsvSourceStats {
    /// Samples parsed successfully
    pub samples_read: usize,
    /// Lines consumed, including header, comments and bad lines
    pub lines_processed: usize,
    /// Lines that could not be parsed
    pub parse_errors: usize,
}

/// Line-oriented CSV sample source
pub struct CsvSource<R> {
    reader: R,
    line: String,
    stats: CsvSourceStats,
    eof: bool,
    /// Set once the first non-blank, non-comment line went by
    seen_content: bool,
}

impl CsvSource<BufReader<File>> {
    /// Open a CSV recording
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> CsvSource<R> {
    /// Wrap any buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            stats: CsvSourceStats::default(),
            eof: false,
            seen_content: false,
        }
    }

    /// Get statistics
    pub fn stats(&self) -> &CsvSourceStats {
        &self.stats
    }

    fn next_line(&mut self) -> Result<bool, SensorError> {
        self.line.clear();
        let bytes = self.reader.read_line(&mut self.line).map_err(|_e| {
            log_warn!("I/O error reading sample file: {}", _e);
            SensorError::Unavailable {
                reason: "I/O error reading sample file",
            }
        })?;

        if bytes == 0 {
            self.eof = true;
            return Ok(false);
        }

        self.stats.lines_processed += 1;
        Ok(true)
    }
}

/// Parse one data line into a sample
fn parse_line(line: &str) -> Result<Sample, &'static str> {
    let fields: heapless::Vec<&str, 8> = line.split(',').map(str::trim).take(8).collect();

    if fields.len() < 5 {
        return Err("Not enough CSV fields");
    }

    let number = |idx: usize, what: &'static str| -> Result<f32, &'static str> {
        fields[idx].parse::<f32>().map_err(|_| what)
    };

    let temperature = number(0, "Invalid temperature")?;
    let pressure = number(1, "Invalid pressure")?;
    let humidity = number(2, "Invalid humidity")?;
    let gas_resistance = number(3, "Invalid gas resistance")?;

    let is_stable = match fields[4].to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => true,
        "false" | "0" | "no" => false,
        _ => return Err("Invalid heat_stable flag"),
    };

    Ok(Sample::new(
        gas_resistance,
        humidity,
        temperature,
        pressure,
        is_stable,
    ))
}

fn is_header(line: &str) -> bool {
    line.split(',')
        .next()
        .map(|first| first.trim().parse::<f32>().is_err())
        .unwrap_or(false)
}

impl<R: BufRead> SampleSource for CsvSource<R> {
    fn read(&mut self) -> nb::Result<Sample, SensorError> {
        loop {
            if self.eof || !self.next_line()? {
                return Err(nb::Error::Other(SensorError::EndOfStream));
            }

            let line = self.line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            // Only the first content line may be a header
            let first = !self.seen_content;
            self.seen_content = true;
            if first && is_header(line) {
                continue;
            }

            return match parse_line(line) {
                Ok(sample) => {
                    self.stats.samples_read += 1;
                    Ok(sample)
                }
                Err(_reason) => {
                    self.stats.parse_errors += 1;
                    log_warn!(
                        "Skipping line {}: {}",
                        self.stats.lines_processed,
                        _reason
                    );
                    Err(nb::Error::Other(SensorError::Unavailable {
                        reason: "Malformed sample line",
                    }))
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const RECORDING: &str = "\
temperature,pressure,humidity,gas_resistance,heat_stable
22.41,1008.32,38.20,118342.7,false
# heater settled
22.43,1008.30,38.25,118951.0,TRUE

22.45,1008.29,38.31,119402.5,1
";

    #[test]
    fn parses_recording() {
        let mut source = CsvSource::new(Cursor::new(RECORDING));

        let first = source.read().unwrap();
        assert!(!first.is_stable);
        assert_eq!(first.gas_resistance, 118342.7);
        assert_eq!(first.pressure, 1008.32);

        let second = source.read().unwrap();
        assert!(second.is_stable);
        assert_eq!(second.humidity, 38.25);

        let third = source.read().unwrap();
        assert!(third.is_stable);

        assert_eq!(
            source.read(),
            Err(nb::Error::Other(SensorError::EndOfStream))
        );
        assert_eq!(source.stats().samples_read, 3);
        assert_eq!(source.stats().parse_errors, 0);
    }

    #[test]
    fn header_after_leading_comments() {
        let data = "\
# bme680 session, bench 2

temperature,pressure,humidity,gas_resistance,heat_stable
21.0,1013.0,40.0,50000,true
";
        let mut source = CsvSource::new(Cursor::new(data));

        assert_eq!(source.read().unwrap().gas_resistance, 50_000.0);
        assert_eq!(
            source.read(),
            Err(nb::Error::Other(SensorError::EndOfStream))
        );
        assert_eq!(source.stats().parse_errors, 0);
        assert_eq!(source.stats().samples_read, 1);
    }

    #[test]
    fn header_only_accepted_once() {
        let data = "21.0,1013.0,40.0,50000,true\ntemperature,pressure,humidity,gas_resistance,heat_stable\n";
        let mut source = CsvSource::new(Cursor::new(data));

        assert!(source.read().is_ok());
        assert!(matches!(
            source.read(),
            Err(nb::Error::Other(SensorError::Unavailable { .. }))
        ));
        assert_eq!(source.stats().parse_errors, 1);
    }

    #[test]
    fn headerless_file() {
        let mut source = CsvSource::new(Cursor::new("21.0,1013.0,40.0,50000,true\n"));
        let sample = source.read().unwrap();
        assert_eq!(sample.gas_resistance, 50_000.0);
    }

    #[test]
    fn malformed_line_skips_one_read() {
        let data = "21.0,1013.0,40.0,oops,true\n21.0,1013.0,40.0,50000,true\n";
        let mut source = CsvSource::new(Cursor::new(data));

        assert!(matches!(
            source.read(),
            Err(nb::Error::Other(SensorError::Unavailable { .. }))
        ));
        assert!(source.read().is_ok());
        assert_eq!(source.stats().parse_errors, 1);
        assert_eq!(source.stats().samples_read, 1);
    }

    #[test]
    fn short_line_rejected() {
        assert_eq!(parse_line("21.0,1013.0"), Err("Not enough CSV fields"));
        assert_eq!(
            parse_line("21.0,1013.0,40.0,50000,maybe"),
            Err("Invalid heat_stable flag")
        );
    }
}
