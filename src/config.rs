use crate::{MockError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".probemock.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub reporting: ReportingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How convenience assertions surface failures
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Panic at the failing call site
    #[default]
    Panic,
    /// Record the failure and keep running the test
    Collect,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ReportingConfig {
    #[serde(default)]
    pub mode: ReportMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Filter used by `logging::init_test_logging` when `RUST_LOG` is unset
    #[serde(default)]
    pub filter: Option<String>,
    /// Emit a debug event for every recorded call
    #[serde(default = "default_trace_calls")]
    pub trace_calls: bool,
}

fn default_trace_calls() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            trace_calls: default_trace_calls(),
        }
    }
}

impl Config {
    /// Load configuration from a file in the current directory
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from `path`, defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            MockError::ConfigError(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_toml_str(&content).map_err(|e| {
            MockError::ConfigError(format!("Failed to parse TOML config from {:?}: {}", path, e))
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| MockError::ConfigError(e.to_string()))
    }

    /// Load default config if file is missing, otherwise fall back on parse failure
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config: {}. Using defaults.", e);
                Config::default()
            }
        }
    }

    pub fn log_filter(&self) -> &str {
        self.logging
            .filter
            .as_deref()
            .unwrap_or(crate::logging::DEFAULT_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.reporting.mode, ReportMode::Panic);
        assert!(config.logging.trace_calls);
        assert_eq!(config.log_filter(), "probemock=info");
    }

    #[test]
    fn parses_all_sections() {
        let config = Config::from_toml_str(
            r#"
            [reporting]
            mode = "collect"

            [logging]
            filter = "probemock=debug"
            trace_calls = false
            "#,
        )
        .unwrap();

        assert_eq!(config.reporting.mode, ReportMode::Collect);
        assert_eq!(config.log_filter(), "probemock=debug");
        assert!(!config.logging.trace_calls);
    }

    #[test]
    fn rejects_unknown_report_mode() {
        let err = Config::from_toml_str("[reporting]\nmode = \"silent\"\n").unwrap_err();

        assert!(matches!(err, MockError::ConfigError(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[reporting]\nmode = \"collect\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.reporting.mode, ReportMode::Collect);
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[reporting\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
    }
}
