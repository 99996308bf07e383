//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::client::{ApiClient, DEFAULT_BASE_URL};
use crate::session::{FileTokenStore, MemoryTokenStore, Session};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Token persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Token file; defaults to the per-user data directory
    pub token_file: Option<String>,

    /// Keep the token between runs. When false the token lives in memory only.
    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_persist() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: None,
            persist: default_persist(),
        }
    }
}

impl SessionConfig {
    pub fn token_path(&self) -> PathBuf {
        self.token_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(FileTokenStore::default_path)
    }

    /// Open the session this configuration describes
    pub fn open(&self) -> Session {
        if self.persist {
            Session::load(FileTokenStore::new(self.token_path()))
        } else {
            Session::load(MemoryTokenStore::new())
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
        let config_paths = [
            dirs::config_dir().map(|p| p.join("nsportal").join("config.toml")),
            Some(PathBuf::from("/etc/nsportal/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("NSPORTAL_API_URL") {
            self.client.base_url = url;
        }

        if let Some(path) = var("NSPORTAL_TOKEN_FILE") {
            self.session.token_file = Some(path);
        }

        if let Some(level) = var("NSPORTAL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("NSPORTAL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Client for the configured API, with the configured session
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.client.base_url.clone(), self.session.open())
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
    format!(
        r#"# NS Portal client configuration
#
# Environment variables override these settings:
# - NSPORTAL_API_URL
# - NSPORTAL_TOKEN_FILE
# - NSPORTAL_LOG_LEVEL
# - NSPORTAL_LOG_FORMAT

[client]
# Portal API base URL, including the /api prefix
base_url = "{}"

[session]
# Where the login token is kept (default: per-user data directory)
# token_file = "~/.local/share/nsportal/auth_token"

# Keep the token between runs; false keeps it in memory only
persist = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        DEFAULT_BASE_URL
    )
}
