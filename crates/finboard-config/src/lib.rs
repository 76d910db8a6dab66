//! Configuration management for finboard
//!
//! This module handles loading, validation, and management of
//! finboard configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::{ConfigError, ConfigErrorCode, ConfigErrorSeverity, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Backend API the dashboard reads transactions from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Origin of the transactions API, e.g. `http://localhost:8000`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// `limit` sent with the view's single fetch
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fetch_limit: default_fetch_limit(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_fetch_limit() -> u32 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

/// Display settings for the transactions table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Page title shown in the shell heading
    #[serde(default = "default_title")]
    pub title: String,
    /// Prefix for amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// chrono format string for the date column
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            currency_symbol: default_currency_symbol(),
            date_format: default_date_format(),
        }
    }
}

fn default_title() -> String {
    "FinTech Dashboard".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%-m/%-d/%Y".to_string()
}

/// Mounted view lifetime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Views untouched for this long are disposed
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    /// How often the idle sweeper runs
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

fn default_idle_timeout_secs() -> u64 {
    1800
}

fn default_sweep_interval_secs() -> u64 {
    60
}

/// Expectations for `finboard probe` against the backend.
/// Defaults describe the reference seed dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Number of items the unparameterised list must return
    #[serde(default = "default_expected_total")]
    pub expected_total: Option<usize>,
    /// Transaction fetched by id
    #[serde(default = "default_sample_id")]
    pub sample_id: i64,
    /// Description the sample transaction must carry
    #[serde(default = "default_expected_description")]
    pub expected_description: Option<String>,
    #[serde(default = "default_probe_skip")]
    pub skip: u32,
    #[serde(default = "default_probe_limit")]
    pub limit: u32,
    /// Origin header sent with the CORS check
    #[serde(default = "default_probe_origin")]
    pub origin: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            expected_total: default_expected_total(),
            sample_id: default_sample_id(),
            expected_description: default_expected_description(),
            skip: default_probe_skip(),
            limit: default_probe_limit(),
            origin: default_probe_origin(),
        }
    }
}

fn default_expected_total() -> Option<usize> {
    Some(25)
}

fn default_sample_id() -> i64 {
    1
}

fn default_expected_description() -> Option<String> {
    Some("Groceries".to_string())
}

fn default_probe_skip() -> u32 {
    5
}

fn default_probe_limit() -> u32 {
    10
}

fn default_probe_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Backend API settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Table display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// View lifetime settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Contract probe expectations
    #[serde(default)]
    pub probe: ProbeConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string_lossy().to_string(),
                }
            } else {
                ConfigError::IoError { message: e.to_string() }
            }
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path`, falling back to defaults on warning-level errors.
    ///
    /// The error behind a fallback is returned with the defaults so the
    /// caller can report it once logging is up.
    pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<(Self, Option<ConfigError>)> {
        match Self::load(path) {
            Ok(config) => Ok((config, None)),
            Err(e) if e.severity() == ConfigErrorSeverity::Warning => Ok((Self::default(), Some(e))),
            Err(e) => Err(e),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(invalid("server.port", "Port must be greater than 0"));
        }

        let base_url = self.backend.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(invalid(
                "backend.base_url",
                "Base URL must start with http:// or https://",
            ));
        }

        if self.backend.fetch_limit == 0 {
            return Err(invalid("backend.fetch_limit", "Fetch limit must be greater than 0"));
        }

        if self.backend.timeout_secs == 0 {
            return Err(invalid("backend.timeout_secs", "Timeout must be greater than 0"));
        }

        if self.session.sweep_interval_secs == 0 {
            return Err(invalid(
                "session.sweep_interval_secs",
                "Sweep interval must be greater than 0",
            ));
        }

        if self.probe.limit == 0 {
            return Err(invalid("probe.limit", "Probe limit must be greater than 0"));
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Replace the backend origin, e.g. from a CLI flag or environment variable
    pub fn with_backend_url(mut self, base_url: Option<String>) -> ConfigResult<Self> {
        if let Some(url) = base_url {
            self.backend.base_url = url;
            self.validate()?;
        }
        Ok(self)
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Default location of the config file
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert_eq!(config.backend.fetch_limit, 1000);
        assert_eq!(config.display.currency_symbol, "$");
        assert_eq!(config.probe.expected_total, Some(25));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("backend:\n  base_url: http://api.internal:9000\n").unwrap();
        assert_eq!(config.backend.base_url, "http://api.internal:9000");
        assert_eq!(config.backend.fetch_limit, 1000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.display.date_format, "%-m/%-d/%Y");
    }

    #[test]
    fn test_bundled_default_parses() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.session.idle_timeout_secs, 1800);
        assert_eq!(config.probe.expected_description.as_deref(), Some("Groceries"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [unclosed").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let err = Config::from_yaml("server:\n  port: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "server.port"));

        let err = Config::from_yaml("backend:\n  base_url: localhost:8000\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "backend.base_url"));

        let err = Config::from_yaml("backend:\n  fetch_limit: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "backend.fetch_limit"));
    }

    #[test]
    fn test_backend_url_override() {
        let config = Config::default()
            .with_backend_url(Some("https://backend.example.com".to_string()))
            .unwrap();
        assert_eq!(config.backend.base_url, "https://backend.example.com");

        let err = Config::default().with_backend_url(Some("ftp://nope".to_string()));
        assert!(err.is_err());

        let unchanged = Config::default().with_backend_url(None).unwrap();
        assert_eq!(unchanged.backend.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/definitely/not/here/config.yaml").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);

        let (config, fallback) = Config::load_or_default("/definitely/not/here/config.yaml").unwrap();
        assert_eq!(config.server.port, 3000);
        let fallback = fallback.expect("missing file is reported");
        assert_eq!(fallback.code(), ConfigErrorCode::FileNotFound);
        assert_eq!(fallback.suggestions().len(), 2);
    }

    #[test]
    fn test_load_or_default_keeps_hard_errors() {
        let path = std::env::temp_dir().join(format!("finboard-bad-{}.yaml", std::process::id()));
        std::fs::write(&path, "server:\n  port: 0\n").unwrap();
        let result = Config::load_or_default(&path);
        std::fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert_eq!(err.severity(), ConfigErrorSeverity::Error);
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
    }

    #[test]
    fn test_default_config_path() {
        assert_eq!(default_config_path(), PathBuf::from("config.yaml"));
    }

    #[test]
    fn test_bind_addr() {
        let config = Config::from_yaml("server:\n  host: 127.0.0.1\n  port: 8081\n").unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
    }
}
