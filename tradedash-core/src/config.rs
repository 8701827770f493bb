//! TOML configuration.
//!
//! Every section is optional; a missing file section falls back to defaults.
//!
//! ```toml
//! [parse]
//! mode = "strict"
//!
//! [cache]
//! enabled = true
//! dir = "/tmp/tradedash"
//!
//! [logging]
//! level = "debug"
//!
//! [connect]
//! delay_ms = 500
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::connect::DEFAULT_CONNECT_DELAY;
use crate::normalize::ParseMode;

const MAX_CONNECT_DELAY_MS: u64 = 60_000;
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub parse: ParseConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    pub connect: ConnectConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseConfig {
    pub mode: ParseMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    pub enabled: bool,
    /// Store directory. `None` uses the platform data directory.
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

impl CacheConfig {
    /// Configured directory, else `<data dir>/tradedash`, else `./.tradedash`.
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("tradedash"))
                .unwrap_or_else(|| PathBuf::from(".tradedash"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectConfig {
    pub delay_ms: u64,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_CONNECT_DELAY.as_millis() as u64,
        }
    }
}

impl ConnectConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl DashboardConfig {
    /// Parse and validate a TOML string.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        if self.connect.delay_ms > MAX_CONNECT_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "connect.delay_ms {} exceeds {MAX_CONNECT_DELAY_MS}",
                self.connect.delay_ms
            )));
        }
        Ok(())
    }
}
