//! Configuration management for vulnscore components

use serde::{Deserialize, Serialize};
use std::path::Path;
use vulnscore_core::{Error, Result, Severity};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "json", "compact"];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Merge with environment variables (VULNSCORE_ prefix)
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        // Output settings
        if let Some(val) = var("VULNSCORE_OUTPUT_FORMAT") {
            if let Ok(format) = val.parse() {
                self.output.format = format;
            }
        }
        if let Some(val) = var("VULNSCORE_SHOW_SUBSCORES") {
            if let Ok(flag) = val.parse() {
                self.output.show_subscores = flag;
            }
        }
        if let Some(val) = var("VULNSCORE_FAIL_ON") {
            if let Ok(severity) = val.parse() {
                self.output.fail_on = Some(severity);
            }
        }

        // Logging
        if let Some(val) = var("VULNSCORE_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = var("VULNSCORE_LOG_FORMAT") {
            self.logging.format = val;
        }

        self
    }

    /// Reject logging values the subscriber cannot use
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(Error::InvalidConfig {
                key: String::from("logging.level"),
                message: format!("expected one of {:?}, got {:?}", LOG_LEVELS, self.logging.level),
            });
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(Error::InvalidConfig {
                key: String::from("logging.format"),
                message: format!(
                    "expected one of {:?}, got {:?}",
                    LOG_FORMATS, self.logging.format
                ),
            });
        }
        Ok(())
    }
}

/// How score reports are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable block per vector
    #[default]
    Text,
    /// One JSON document per vector
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::InvalidConfig {
                key: String::from("output.format"),
                message: format!("unknown output format: {other}"),
            }),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (text, json)
    #[serde(default)]
    pub format: OutputFormat,

    /// Include impact/exploitability sub-scores
    #[serde(default)]
    pub show_subscores: bool,

    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty_json: bool,

    /// Exit with failure when any vector reaches this severity
    pub fail_on: Option<Severity>,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            show_subscores: false,
            pretty_json: true,
            fail_on: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    String::from("warn")
}

fn default_log_format() -> String {
    String::from("compact")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Builder for constructing Config
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn show_subscores(mut self, show: bool) -> Self {
        self.config.output.show_subscores = show;
        self
    }

    pub fn fail_on(mut self, severity: Severity) -> Self {
        self.config.output.fail_on = Some(severity);
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn log_format(mut self, format: impl Into<String>) -> Self {
        self.config.logging.format = format.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [output]
            format = "json"
            show_subscores = true
            fail_on = "High"

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.show_subscores);
        assert!(config.output.pretty_json);
        assert_eq!(config.output.fail_on, Some(Severity::High));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let err = Config::from_toml("[logging]\nlevel = \"loud\"").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { ref key, .. } if key == "logging.level"));
    }

    #[test]
    fn test_unparseable_toml() {
        let err = Config::from_toml("[output\nformat = 1").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_config_builder() {
        let config = Config::builder()
            .output_format(OutputFormat::Json)
            .show_subscores(true)
            .fail_on(Severity::Critical)
            .log_level("trace")
            .build();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.show_subscores);
        assert_eq!(config.output.fail_on, Some(Severity::Critical));
        assert_eq!(config.logging.level, "trace");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_merge_vars() {
        let config = Config::default().merge_vars(|key| match key {
            "VULNSCORE_OUTPUT_FORMAT" => Some(String::from("JSON")),
            "VULNSCORE_SHOW_SUBSCORES" => Some(String::from("true")),
            "VULNSCORE_FAIL_ON" => Some(String::from("medium")),
            "VULNSCORE_LOG_LEVEL" => Some(String::from("info")),
            _ => None,
        });

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.show_subscores);
        assert_eq!(config.output.fail_on, Some(Severity::Medium));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_merge_vars_ignores_bad_values() {
        let config = Config::default().merge_vars(|key| match key {
            "VULNSCORE_OUTPUT_FORMAT" => Some(String::from("xml")),
            "VULNSCORE_SHOW_SUBSCORES" => Some(String::from("maybe")),
            _ => None,
        });
        assert_eq!(config.output, OutputConfig::default());
    }
}
