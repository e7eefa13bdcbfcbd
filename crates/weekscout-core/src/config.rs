use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Timeouts above this are allowed but probably a typo
const MAX_SENSIBLE_TIMEOUT_SECS: u64 = 120;

/// Nominatim wants a user agent that identifies the application
const USER_AGENT_TOKEN: &str = "weekscout/";
const DEFAULT_USER_AGENT: &str = concat!("weekscout/", env!("CARGO_PKG_VERSION"));

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Forecast API settings
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Place search settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Output preferences
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Open-Meteo compatible base URL
    #[serde(default = "default_forecast_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: default_forecast_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Nominatim compatible base URL
    #[serde(default = "default_geocoding_url")]
    pub base_url: String,

    /// Sent with every request, as Nominatim's usage policy requires
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geocoding_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Print the reason next to each score
    #[serde(default = "default_show_reasons")]
    pub show_reasons: bool,
}

fn default_show_reasons() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_reasons: default_show_reasons(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Load configuration (from `path` if given) and validate it
    ///
    /// Warnings are logged. Returns an error if validation finds errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.forecast.base_url, "forecast.base_url", &mut result);
        self.validate_url(&self.geocoding.base_url, "geocoding.base_url", &mut result);

        validate_timeout(self.forecast.timeout_secs, "forecast.timeout_secs", &mut result);
        validate_timeout(self.geocoding.timeout_secs, "geocoding.timeout_secs", &mut result);

        validate_user_agent(&self.geocoding.user_agent, "geocoding.user_agent", &mut result);

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.scheme() == "http" {
                    result.add_warning(field_name, "URL is not using https");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the default configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("weekscout");

        Ok(config_dir.join("config.toml"))
    }
}

fn validate_timeout(secs: u64, field_name: &str, result: &mut ValidationResult) {
    if secs == 0 {
        result.add_error(field_name, "Timeout must be greater than 0");
    } else if secs > MAX_SENSIBLE_TIMEOUT_SECS {
        result.add_warning(
            field_name,
            format!("Timeout is unusually long (>{}s)", MAX_SENSIBLE_TIMEOUT_SECS),
        );
    }
}

fn validate_user_agent(agent: &str, field_name: &str, result: &mut ValidationResult) {
    let agent = agent.trim();
    if agent.is_empty() {
        result.add_error(field_name, "User agent must not be empty");
    } else if !agent.to_ascii_lowercase().contains(USER_AGENT_TOKEN) {
        result.add_warning(
            field_name,
            format!(
                "User agent '{}' does not identify weekscout; Nominatim may block generic agents",
                agent
            ),
        );
    }
}
