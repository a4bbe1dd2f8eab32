//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::transaction::DEFAULT_PAGE_SIZE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Page size when a request has no `limit`
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Largest accepted `limit`
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u32 {
    100
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dashboard client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the dashboard server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the snapshot document
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Path of the transaction list endpoint
    #[serde(default = "default_transactions_path")]
    pub transactions_path: String,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_client_timeout")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_snapshot_path() -> String {
    "/static/xml/data.xml".to_string()
}

fn default_transactions_path() -> String {
    "/api/transactions".to_string()
}

fn default_client_timeout() -> u64 {
    10_000
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            snapshot_path: default_snapshot_path(),
            transactions_path: default_transactions_path(),
            page_size: default_page_size(),
            request_timeout_ms: default_client_timeout(),
        }
    }
}

/// Server-side data files
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Transaction or SMS backup XML document
    #[serde(default = "default_transactions_file")]
    pub transactions_file: String,

    /// Pre-built snapshot document; generated from the transactions when unset
    #[serde(default)]
    pub snapshot_file: Option<String>,
}

fn default_transactions_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("momo").join("transactions.xml").to_string_lossy().to_string())
        .unwrap_or_else(|| "./data/transactions.xml".to_string())
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            transactions_file: default_transactions_file(),
            snapshot_file: None,
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

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
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
            dirs::config_dir().map(|p| p.join("momo").join("config.toml")),
            Some(PathBuf::from("/etc/momo/config.toml")),
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
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(host) = std::env::var("MOMO_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("MOMO_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Dashboard overrides
        if let Ok(url) = std::env::var("MOMO_BASE_URL") {
            self.dashboard.base_url = url;
        }
        if let Ok(size) = std::env::var("MOMO_PAGE_SIZE") {
            if let Ok(s) = size.parse() {
                self.dashboard.page_size = s;
            }
        }

        // Data overrides
        if let Ok(path) = std::env::var("MOMO_TRANSACTIONS_FILE") {
            self.data.transactions_file = path;
        }
        if let Ok(path) = std::env::var("MOMO_SNAPSHOT_FILE") {
            self.data.snapshot_file = Some(path);
        }

        // Logging overrides
        if let Ok(level) = std::env::var("MOMO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MOMO_LOG_FORMAT") {
            self.logging.format = format;
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
    r#"# MoMo Dashboard Configuration
#
# Environment variables override these settings:
# - MOMO_API_HOST
# - MOMO_API_PORT
# - MOMO_BASE_URL
# - MOMO_PAGE_SIZE
# - MOMO_TRANSACTIONS_FILE
# - MOMO_SNAPSHOT_FILE
# - MOMO_LOG_LEVEL
# - MOMO_LOG_FORMAT

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 5000

# Request timeout in seconds
request_timeout_secs = 30

# Page size when a request has no limit, and the largest accepted limit
default_page_size = 10
max_page_size = 100

[dashboard]
# Dashboard server the CLI talks to
base_url = "http://localhost:5000"

# Snapshot document and transaction list endpoint
snapshot_path = "/static/xml/data.xml"
transactions_path = "/api/transactions"

# Rows per page in the transaction table
page_size = 10

# Request timeout in milliseconds
request_timeout_ms = 10000

[data]
# Transaction XML or SMS backup export served by momo-api
transactions_file = "./data/transactions.xml"

# Optional pre-built snapshot document (generated from transactions when unset)
# snapshot_file = "./data/data.xml"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
