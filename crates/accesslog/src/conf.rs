//! Conf — parser configuration model and loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::coerce::DEFAULT_TIME_FORMAT;
use crate::format::FormatKind;
use crate::model::ParseError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Which built-in grammar to parse with.
    pub format: FormatKind,
    /// strptime-style layout for the bracketed timestamp.
    pub time_format: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            format: FormatKind::Combined,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl ParserConfig {
    /// Load configuration from file or environment variables.
    /// Priority: environment variables > config file > defaults.
    pub fn load() -> Result<Self, ParseError> {
        let config_path = std::env::var("ACCESSLOG_CONFIG_FILE")
            .unwrap_or_else(|_| "accesslog.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            Self::from_env()
        };

        // Environment variables override file config
        if let Ok(name) = std::env::var("ACCESSLOG_FORMAT") {
            config.format = FormatKind::from_name(&name)
                .ok_or_else(|| ParseError::Config(format!("unknown log format: {}", name)))?;
        }
        if let Ok(layout) = std::env::var("ACCESSLOG_TIME_FORMAT") {
            config.time_format = layout;
        }

        config.validate().map_err(ParseError::Config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ParseError::Config(e.to_string()))
    }

    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        Self {
            format: std::env::var("ACCESSLOG_FORMAT")
                .ok()
                .and_then(|name| FormatKind::from_name(&name))
                .unwrap_or_default(),
            time_format: std::env::var("ACCESSLOG_TIME_FORMAT")
                .unwrap_or_else(|_| DEFAULT_TIME_FORMAT.to_string()),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.time_format.is_empty() {
            return Err("time_format must not be empty".to_string());
        }
        Ok(())
    }
}
