//! Process configuration, read from environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_LOG_LEVEL: &str = "POSLINE_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "POSLINE_LOG_FORMAT";
pub const ENV_POS_CONFIG: &str = "POSLINE_POS_CONFIG";
pub const ENV_SALESPERSONS: &str = "POSLINE_SALESPERSONS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(ConfigError::InvalidValue {
                var: ENV_LOG_FORMAT,
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    /// JSON file holding the till's `PosConfig`.
    pub pos_config_path: Option<PathBuf>,
    /// JSON file holding the salesperson directory.
    pub salespersons_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut logging = LoggingConfig::default();
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
            logging.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT).filter(|v| !v.trim().is_empty()) {
            logging.format = format.parse()?;
        }

        Ok(Self {
            logging,
            pos_config_path: lookup(ENV_POS_CONFIG).map(PathBuf::from),
            salespersons_path: lookup(ENV_SALESPERSONS).map(PathBuf::from),
        })
    }

    /// Log which optional inputs fell back to defaults.
    ///
    /// Call once logging is initialized (logging itself is configured from
    /// this struct).
    pub fn report_defaults(&self) {
        if self.pos_config_path.is_none() {
            tracing::warn!("{ENV_POS_CONFIG} not set; printing the plain projection");
        }
        if self.salespersons_path.is_none() {
            tracing::warn!("{ENV_SALESPERSONS} not set; salesperson directory is empty");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_paths_and_logging() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_FORMAT, "Pretty"),
            (ENV_POS_CONFIG, "/etc/posline/till.json"),
            (ENV_SALESPERSONS, "/etc/posline/staff.json"),
        ]))
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.pos_config_path, Some(PathBuf::from("/etc/posline/till.json")));
        assert_eq!(config.salespersons_path, Some(PathBuf::from("/etc/posline/staff.json")));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_LOG_FORMAT, "xml")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: ENV_LOG_FORMAT,
                value: "xml".to_string()
            }
        );
    }
}
