//! Analysis defaults, loadable from TOML.
//!
//! ```toml
//! [beta]
//! market_ticker = "^GSPC"
//! start_date = "2018-01-01"
//! interval = "1mo"
//!
//! [dcf]
//! terminal_growth = 0.02
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

use crate::analytics::{DEFAULT_MARKET_TICKER, DEFAULT_TERMINAL_GROWTH};
use crate::domain::Interval;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub beta: BetaDefaults,
    pub dcf: DcfDefaults,
}

/// Defaults for provider-backed beta requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BetaDefaults {
    pub market_ticker: String,
    pub start_date: NaiveDate,
    pub interval: Interval,
}

impl Default for BetaDefaults {
    fn default() -> Self {
        Self {
            market_ticker: DEFAULT_MARKET_TICKER.to_string(),
            start_date: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default(),
            interval: Interval::Monthly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DcfDefaults {
    pub terminal_growth: f64,
}

impl Default for DcfDefaults {
    fn default() -> Self {
        Self {
            terminal_growth: DEFAULT_TERMINAL_GROWTH,
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
