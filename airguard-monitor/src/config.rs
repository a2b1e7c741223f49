//! Configuration loading
//!
//! Resolution order, highest priority first:
//! 1. Command-line flags (and their environment variables)
//! 2. TOML file given with `--config`
//! 3. Compiled-in defaults
//!
//! ```toml
//! [air_quality]
//! burn_in_secs = 120
//! hum_baseline = 45.0
//! ```
//!
//! Keys missing from the file keep their defaults. The merged result is
//! validated before any sampling starts.

use std::path::Path;

use airguard_core::AirQualityConfig;
use clap::Args;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{MonitorError, Result};

/// On-disk configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub air_quality: AirQualityConfig,
}

impl FileConfig {
    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| MonitorError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| MonitorError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Command-line overrides for [`AirQualityConfig`]
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Burn-in duration in seconds
    #[arg(long, global = true, env = "AIRGUARD_BURN_IN_SECS")]
    pub burn_in_secs: Option<u64>,

    /// Poll interval during burn-in (ms)
    #[arg(long, global = true)]
    pub calibration_interval_ms: Option<u64>,

    /// Poll interval while scoring (ms)
    #[arg(long, global = true)]
    pub scoring_interval_ms: Option<u64>,

    /// Reference humidity (%RH)
    #[arg(long, global = true, env = "AIRGUARD_HUM_BASELINE")]
    pub hum_baseline: Option<f32>,

    /// Humidity share of the composite score (0-1)
    #[arg(long, global = true)]
    pub hum_weighting: Option<f32>,
}

impl ConfigOverrides {
    fn apply(&self, mut config: AirQualityConfig) -> AirQualityConfig {
        if let Some(secs) = self.burn_in_secs {
            config = config.with_burn_in_secs(secs);
        }
        if let Some(ms) = self.calibration_interval_ms {
            config = config.with_calibration_interval_ms(ms);
        }
        if let Some(ms) = self.scoring_interval_ms {
            config = config.with_scoring_interval_ms(ms);
        }
        if let Some(pct) = self.hum_baseline {
            config = config.with_hum_baseline(pct);
        }
        if let Some(weighting) = self.hum_weighting {
            config = config.with_hum_weighting(weighting);
        }
        config
    }
}

/// Merge defaults, the optional file and CLI overrides, then validate
pub fn resolve(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<AirQualityConfig> {
    let base = match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            FileConfig::load(path)?.air_quality
        }
        None => AirQualityConfig::default(),
    };

    let config = overrides.apply(base);
    config.validate()?;
    debug!(?config, "Resolved configuration");
    Ok(config)
}
