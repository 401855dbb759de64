//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::source::{DiseaseShConfig, DEFAULT_COUNTRIES_URL, DEFAULT_HISTORICAL_URL};

/// Default plotly.js bundle served to browsers
pub const DEFAULT_PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Upstream statistics API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_countries_url")]
    pub countries_url: String,

    #[serde(default = "default_historical_url")]
    pub historical_url: String,

    /// Unset means no client-side timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_countries_url() -> String {
    DEFAULT_COUNTRIES_URL.to_string()
}

fn default_historical_url() -> String {
    DEFAULT_HISTORICAL_URL.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            countries_url: default_countries_url(),
            historical_url: default_historical_url(),
            request_timeout_secs: None,
        }
    }
}

impl SourceConfig {
    /// Client configuration for the disease.sh source
    pub fn client_config(&self) -> DiseaseShConfig {
        DiseaseShConfig {
            countries_url: self.countries_url.clone(),
            historical_url: self.historical_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..Default::default()
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_plotly_js_url")]
    pub plotly_js_url: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_plotly_js_url() -> String {
    DEFAULT_PLOTLY_JS_URL.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            plotly_js_url: default_plotly_js_url(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable (development)
    #[default]
    Pretty,
    /// One JSON object per line (production)
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Invalid(format!("unknown log format '{}'", other))),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Config file locations, highest priority first
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("covid-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/covid-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// Unparseable numeric or enum values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Source overrides
        if let Some(url) = lookup("COVID_DASHBOARD_COUNTRIES_URL") {
            self.source.countries_url = url;
        }
        if let Some(url) = lookup("COVID_DASHBOARD_HISTORICAL_URL") {
            self.source.historical_url = url;
        }
        if let Some(secs) = lookup("COVID_DASHBOARD_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(s) => self.source.request_timeout_secs = Some(s),
                Err(_) => tracing::warn!("Ignoring invalid COVID_DASHBOARD_TIMEOUT_SECS: {}", secs),
            }
        }

        // Server overrides
        if let Some(host) = lookup("COVID_DASHBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("COVID_DASHBOARD_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid COVID_DASHBOARD_PORT: {}", port),
            }
        }
        if let Some(url) = lookup("COVID_DASHBOARD_PLOTLY_URL") {
            self.server.plotly_js_url = url;
        }

        // Logging overrides
        if let Some(level) = lookup("COVID_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("COVID_DASHBOARD_LOG_FORMAT") {
            match format.parse() {
                Ok(f) => self.logging.format = f,
                Err(e) => tracing::warn!("Ignoring COVID_DASHBOARD_LOG_FORMAT: {}", e),
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# COVID-19 Dashboard Configuration
#
# Environment variables override these settings:
# - COVID_DASHBOARD_COUNTRIES_URL
# - COVID_DASHBOARD_HISTORICAL_URL
# - COVID_DASHBOARD_TIMEOUT_SECS
# - COVID_DASHBOARD_HOST
# - COVID_DASHBOARD_PORT
# - COVID_DASHBOARD_PLOTLY_URL
# - COVID_DASHBOARD_LOG_LEVEL
# - COVID_DASHBOARD_LOG_FORMAT

[source]
# Per-country snapshot
countries_url = "{countries}"

# Global time series, all available days
historical_url = "{historical}"

# Per-request timeout in seconds (unset: no timeout)
# request_timeout_secs = 30

[server]
# Dashboard host
host = "127.0.0.1"

# Dashboard port
port = 8050

# plotly.js bundle loaded by the page
plotly_js_url = "{plotly}"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        countries = DEFAULT_COUNTRIES_URL,
        historical = DEFAULT_HISTORICAL_URL,
        plotly = DEFAULT_PLOTLY_JS_URL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source.countries_url, DEFAULT_COUNTRIES_URL);
        assert_eq!(config.source.historical_url, DEFAULT_HISTORICAL_URL);
        assert_eq!(config.source.request_timeout_secs, None);
        assert_eq!(config.server.addr(), "127.0.0.1:8050");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_generated_config_round_trips_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.source.countries_url, DEFAULT_COUNTRIES_URL);
        assert_eq!(config.server.port, 8050);
        assert_eq!(config.server.plotly_js_url, DEFAULT_PLOTLY_JS_URL);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file() {
        let config = Config::parse(
            r#"
            [source]
            request_timeout_secs = 10

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.request_timeout_secs, Some(10));
        assert_eq!(config.source.countries_url, DEFAULT_COUNTRIES_URL);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.server.port, 8050);

        let client = config.source.client_config();
        assert_eq!(client.request_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_load_errors() {
        let err = Config::load(Path::new("/nonexistent/covid-dashboard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a port\"").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("COVID_DASHBOARD_COUNTRIES_URL", "http://localhost:1/c"),
            ("COVID_DASHBOARD_TIMEOUT_SECS", "5"),
            ("COVID_DASHBOARD_PORT", "not-a-number"),
            ("COVID_DASHBOARD_HOST", "0.0.0.0"),
            ("COVID_DASHBOARD_LOG_FORMAT", "JSON"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.source.countries_url, "http://localhost:1/c");
        assert_eq!(config.source.historical_url, DEFAULT_HISTORICAL_URL);
        assert_eq!(config.source.request_timeout_secs, Some(5));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8050);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
