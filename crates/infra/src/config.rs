//! Engine configuration loaded from TOML.
//!
//! ```toml
//! [forecast]
//! safe_threshold = "5000"
//! initial_balance = "12500.250"
//! horizon_days = 60
//!
//! [logging]
//! filter = "info,pharmaops_infra=debug"
//! json = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use pharmaops_core::{DomainError, Money};
use pharmaops_observability::LogConfig;
use pharmaops_treasury::Settings;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "PHARMAOPS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid forecast settings: {0}")]
    Invalid(#[from] DomainError),
}

/// Defaults applied to branches that have no stored settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub safe_threshold: Money,
    pub initial_balance: Money,
    pub horizon_days: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            safe_threshold: settings.safe_threshold,
            initial_balance: settings.initial_balance,
            horizon_days: settings.forecast_horizon_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub forecast: ForecastConfig,
    pub logging: LogConfig,
}

impl EngineConfig {
    /// Parse and validate a TOML document. Out-of-range settings are rejected here,
    /// never at forecast time.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s)?;
        config.settings()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading engine config");
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from the file named by `PHARMAOPS_CONFIG`, or fall back to defaults
    /// when the variable is unset.
    pub fn from_env_or_default() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validated forecast settings.
    pub fn settings(&self) -> Result<Settings, DomainError> {
        Settings::new(
            self.forecast.safe_threshold,
            self.forecast.initial_balance,
            self.forecast.horizon_days,
        )
    }

    /// Install the process-wide tracing subscriber described by `[logging]`.
    pub fn init_logging(&self) {
        pharmaops_observability::init_with(&self.logging);
    }
}
