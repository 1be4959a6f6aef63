//! Configuration management for the export tool
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::EcosanteError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EcosanteConfig {
    /// Commune lookup service (city name to INSEE code)
    pub geocoder: ServiceConfig,
    /// Air quality forecast service
    pub forecast: ServiceConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Where generated files land
    pub output: OutputConfig,
}

/// Settings shared by both HTTP services
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL, without trailing path
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

// Default value functions
fn default_geocoder_base_url() -> String {
    "https://geo.api.gouv.fr".to_string()
}

fn default_forecast_base_url() -> String {
    "https://app-ed2e0e03-0bd3-4eb4-8326-000288aeb6a0.cleverapps.io".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for EcosanteConfig {
    fn default() -> Self {
        Self {
            geocoder: ServiceConfig {
                base_url: default_geocoder_base_url(),
                timeout_seconds: default_timeout(),
            },
            forecast: ServiceConfig {
                base_url: default_forecast_base_url(),
                timeout_seconds: default_timeout(),
            },
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

// An empty base URL is filled per service by `apply_defaults`
impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl EcosanteConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. ECOSANTE__FORECAST__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix("ECOSANTE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: EcosanteConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ecosante-export").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.geocoder.base_url.is_empty() {
            self.geocoder.base_url = default_geocoder_base_url();
        }
        if self.geocoder.timeout_seconds == 0 {
            self.geocoder.timeout_seconds = default_timeout();
        }
        if self.forecast.base_url.is_empty() {
            self.forecast.base_url = default_forecast_base_url();
        }
        if self.forecast.timeout_seconds == 0 {
            self.forecast.timeout_seconds = default_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.output.directory.as_os_str().is_empty() {
            self.output.directory = PathBuf::from(".");
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        Self::validate_service("geocoder", &self.geocoder)?;
        Self::validate_service("forecast", &self.forecast)?;
        self.validate_logging()?;
        Ok(())
    }

    fn validate_service(name: &str, service: &ServiceConfig) -> Result<()> {
        if !service.base_url.starts_with("http://") && !service.base_url.starts_with("https://") {
            return Err(EcosanteError::config(format!(
                "{name} base URL must be a valid HTTP or HTTPS URL"
            ))
            .into());
        }

        if service.timeout_seconds == 0 || service.timeout_seconds > 300 {
            return Err(EcosanteError::config(format!(
                "{name} timeout must be between 1 and 300 seconds"
            ))
            .into());
        }

        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(EcosanteError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(EcosanteError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EcosanteConfig::default();
        assert_eq!(config.geocoder.base_url, "https://geo.api.gouv.fr");
        assert!(config.forecast.base_url.contains("cleverapps.io"));
        assert_eq!(config.forecast.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = EcosanteConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_bad_url() {
        let mut config = EcosanteConfig::default();
        config.forecast.base_url = "ftp://example.org".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("forecast base URL"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = EcosanteConfig::default();
        config.geocoder.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = EcosanteConfig::default();
        config.forecast.base_url.clear();
        config.logging.format.clear();
        config.apply_defaults();
        assert!(config.forecast.base_url.contains("cleverapps.io"));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[forecast]\nbase_url = \"http://localhost:8080\"\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = EcosanteConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.forecast.base_url, "http://localhost:8080");
        assert_eq!(config.forecast.timeout_seconds, 30);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.geocoder.base_url, "https://geo.api.gouv.fr");
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = EcosanteConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("ecosante-export"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
