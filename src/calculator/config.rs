use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("loglevel must be off, none, debug, info, warn or error, got \"{0}\"")]
    InvalidLogLevel(String),
}

/// Settings of the command line front end. Tolerances are fixed constants and are not
/// part of the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// off, none, debug, info, warn or error
    pub loglevel: String,
    /// variable of `derivative(expr)` when none is given
    pub default_derivative_variable: String,
    /// directory for a timestamped log file, no file logging when absent
    pub log_file: Option<PathBuf>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            loglevel: "info".to_string(),
            default_derivative_variable: "x".to_string(),
            log_file: None,
        }
    }
}

impl CalculatorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CalculatorConfig = toml::from_str(content)?;
        config.level_filter()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// `None` when logging is switched off.
    pub fn level_filter(&self) -> Result<Option<LevelFilter>, ConfigError> {
        let level = match self.loglevel.as_str() {
            "off" | "none" => return Ok(None),
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            other => return Err(ConfigError::InvalidLogLevel(other.to_string())),
        };
        Ok(Some(level))
    }
}
