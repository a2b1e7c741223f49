//! Host-side reporting for AirGuard
//!
//! Polls a sample source, runs the burn-in, then prints an air quality
//! report for every stable reading:
//!
//! - [`live`]: real-time loop on a tokio timer, stopped by Ctrl+C
//! - [`replay`]: instant run over a CSV recording
//! - [`simulated`]: a stand-in sensor for running without hardware
//!
//! The algorithms live in `airguard-core`; this crate only adds timing,
//! configuration files and console output.

pub mod config;
pub mod error;
pub mod live;
pub mod replay;
pub mod report;
pub mod simulated;

pub use config::{resolve, ConfigOverrides, FileConfig};
pub use error::{MonitorError, Result};
pub use live::{LiveSummary, StopReason};
pub use report::{Reporter, SessionStats};
pub use simulated::{SimulatedSource, SimulationConfig};
