//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::csrf::{DEFAULT_COOKIE_NAME, DEFAULT_HEADER_NAME};
use crate::view::{ControllerOptions, CANONICAL_PATH, DEFAULT_LOADING_MESSAGE, DEFAULT_VIEW};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard backend connection
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Raw `Cookie` header of a logged-in session
    pub cookie: Option<String>,

    #[serde(default = "default_csrf_cookie")]
    pub csrf_cookie_name: String,

    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,

    /// No timeout when unset
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_csrf_cookie() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

fn default_csrf_header() -> String {
    DEFAULT_HEADER_NAME.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cookie: None,
            csrf_cookie_name: default_csrf_cookie(),
            csrf_header: default_csrf_header(),
            request_timeout_secs: None,
        }
    }
}

/// View controller settings
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_view")]
    pub default_view: String,

    #[serde(default = "default_canonical_path")]
    pub canonical_path: String,

    #[serde(default = "default_loading_message")]
    pub loading_message: String,
}

fn default_view() -> String {
    DEFAULT_VIEW.to_string()
}

fn default_canonical_path() -> String {
    CANONICAL_PATH.to_string()
}

fn default_loading_message() -> String {
    DEFAULT_LOADING_MESSAGE.to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_view: default_view(),
            canonical_path: default_canonical_path(),
            loading_message: default_loading_message(),
        }
    }
}

impl DashboardConfig {
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            default_view: self.default_view.clone(),
            canonical_path: self.canonical_path.clone(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Candidate config files, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("gymdash").join("config.toml")),
            Some(PathBuf::from("./gymdash.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("GYMDASH_BASE_URL") {
            self.server.base_url = url;
        }
        if let Some(cookie) = lookup("GYMDASH_COOKIE") {
            self.server.cookie = Some(cookie);
        }

        if let Some(level) = lookup("GYMDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("GYMDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    #[cfg(feature = "native")]
    pub fn transport_config(&self) -> crate::transport::HttpTransportConfig {
        crate::transport::HttpTransportConfig {
            base_url: self.server.base_url.clone(),
            cookie: self.server.cookie.clone(),
            csrf: crate::csrf::CsrfConfig {
                cookie_name: self.server.csrf_cookie_name.clone(),
                header_name: self.server.csrf_header.clone(),
            },
            request_timeout: self
                .server
                .request_timeout_secs
                .map(std::time::Duration::from_secs),
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
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# GymAI Dashboard Configuration
#
# Environment variables override these settings:
# - GYMDASH_BASE_URL
# - GYMDASH_COOKIE
# - GYMDASH_LOG_LEVEL
# - GYMDASH_LOG_FORMAT

[server]
# Dashboard backend origin
base_url = "http://localhost:8000"

# Cookie header of a logged-in browser session (sessionid and csrftoken)
# cookie = "sessionid=...; csrftoken=..."

# Cookie holding the CSRF token, and the header it is echoed in
csrf_cookie_name = "csrftoken"
csrf_header = "X-CSRFToken"

# Request timeout in seconds (unset: wait indefinitely)
# request_timeout_secs = 30

[dashboard]
# View loaded when no ?tab= parameter is given
default_view = "overview"

# Address left in the location bar after a deep link
canonical_path = "/dashboard/"

# Loader text for view switches
loading_message = "Loading your dashboard..."

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.server.cookie, None);
        assert_eq!(config.dashboard.default_view, "overview");
        assert_eq!(config.dashboard.loading_message, DEFAULT_LOADING_MESSAGE);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nbase_url = \"https://gym.example.com\"\nrequest_timeout_secs = 10\n\n[dashboard]\ndefault_view = \"progress\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.base_url, "https://gym.example.com");
        assert_eq!(config.server.request_timeout_secs, Some(10));
        assert_eq!(config.server.csrf_header, "X-CSRFToken");
        assert_eq!(config.dashboard.default_view, "progress");
        assert_eq!(config.dashboard.canonical_path, "/dashboard/");
        assert_eq!(config.logging.level, "info");

        let options = config.dashboard.controller_options();
        assert_eq!(options.default_view, "progress");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[server\nbase_url = 1").unwrap();
        assert!(matches!(Config::load(&bad), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("GYMDASH_BASE_URL", "http://10.0.0.5:8000"),
            ("GYMDASH_COOKIE", "sessionid=abc; csrftoken=xyz"),
            ("GYMDASH_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.base_url, "http://10.0.0.5:8000");
        assert_eq!(
            config.server.cookie.as_deref(),
            Some("sessionid=abc; csrftoken=xyz")
        );
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_transport_config() {
        let mut config = Config::default();
        config.server.request_timeout_secs = Some(5);
        config.server.csrf_cookie_name = "csrf".to_string();

        let transport = config.transport_config();
        assert_eq!(
            transport.request_timeout,
            Some(std::time::Duration::from_secs(5))
        );
        assert_eq!(transport.csrf.cookie_name, "csrf");
        assert_eq!(transport.csrf.header_name, "X-CSRFToken");
    }
}
