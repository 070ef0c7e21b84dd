//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files, a `.env` file in the working directory, and
//! environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Highest numbered `TWITTER_BEARER_TOKEN_{n}` variable that is read
const MAX_NUMBERED_TOKENS: usize = 9;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub twitter: TwitterConfig,

    #[serde(default)]
    pub storage: StorageConfig,

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

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_max_connections")]
    pub max_ws_connections: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_connections() -> usize {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_ws_connections: default_max_connections(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Twitter API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TwitterConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Bearer tokens, used in order; the service rotates on rate limits
    #[serde(default)]
    pub bearer_tokens: Vec<String>,

    #[serde(default = "default_max_results")]
    pub max_results: u32,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_api_base() -> String {
    "https://api.twitter.com/2".to_string()
}

fn default_max_results() -> u32 {
    10
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            bearer_tokens: Vec::new(),
            max_results: default_max_results(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Number of stored tweets returned by `GET /api/tweets/:keyword`
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_db_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("pulsetrack").join("pulsetrack.db").to_string_lossy().to_string())
        .unwrap_or_else(|| "./pulsetrack.db".to_string())
}

fn default_history_limit() -> usize {
    50
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            history_limit: default_history_limit(),
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

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
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
            dirs::config_dir().map(|p| p.join("pulsetrack").join("config.toml")),
            Some(PathBuf::from("/etc/pulsetrack/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
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

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // API overrides
        if let Ok(host) = std::env::var("PULSETRACK_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("PULSETRACK_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Twitter overrides
        if let Ok(base) = std::env::var("TWITTER_API_BASE") {
            self.twitter.api_base = base;
        }
        let env_tokens = collect_bearer_tokens(|name| std::env::var(name).ok());
        if !env_tokens.is_empty() {
            self.twitter.bearer_tokens = env_tokens;
        }

        // Storage overrides
        if let Ok(db_path) = std::env::var("PULSETRACK_DB_PATH") {
            self.storage.db_path = db_path;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("PULSETRACK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PULSETRACK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Collect bearer tokens from `TWITTER_BEARER_TOKEN_1` .. `TWITTER_BEARER_TOKEN_9`,
/// falling back to a single `TWITTER_BEARER_TOKEN`.
///
/// Gaps in the numbering are skipped. Empty values are ignored.
pub fn collect_bearer_tokens<F>(lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut tokens: Vec<String> = (1..=MAX_NUMBERED_TOKENS)
        .filter_map(|i| lookup(&format!("TWITTER_BEARER_TOKEN_{}", i)))
        .filter(|t| !t.trim().is_empty())
        .collect();

    if tokens.is_empty() {
        if let Some(token) = lookup("TWITTER_BEARER_TOKEN").filter(|t| !t.trim().is_empty()) {
            tokens.push(token);
        }
    }

    tokens
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("No Twitter bearer tokens configured (set TWITTER_BEARER_TOKEN_1..9)")]
    NoBearerTokens,
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# PulseTrack Configuration
#
# A .env file in the working directory is loaded first.
# Environment variables override these settings:
# - PULSETRACK_HOST
# - PULSETRACK_PORT
# - PULSETRACK_DB_PATH
# - PULSETRACK_LOG_LEVEL
# - PULSETRACK_LOG_FORMAT
# - TWITTER_API_BASE
# - TWITTER_BEARER_TOKEN_1 .. TWITTER_BEARER_TOKEN_9 (or TWITTER_BEARER_TOKEN)

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 5000

# Allowed CORS origins (empty allows any origin)
cors_origins = []

# Maximum concurrent dashboard connections
max_ws_connections = 1000

[twitter]
# Twitter API v2 base URL
api_base = "https://api.twitter.com/2"

# Bearer tokens, rotated when one hits the rate limit
bearer_tokens = []

# Tweets fetched per search (10-100)
max_results = 10

# Request timeout in milliseconds
request_timeout_ms = 10000

[storage]
# SQLite database file
db_path = "./pulsetrack.db"

# Stored tweets returned per keyword lookup
history_limit = 50

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

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.port, 5000);
        assert_eq!(config.api.addr(), "0.0.0.0:5000");
        assert_eq!(config.twitter.max_results, 10);
        assert_eq!(config.storage.history_limit, 50);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.twitter.bearer_tokens.is_empty());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = Config::parse(
            r#"
            [api]
            port = 8090

            [twitter]
            bearer_tokens = ["a", "b"]
            "#,
        )
        .unwrap();

        assert_eq!(config.api.port, 8090);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.twitter.bearer_tokens, vec!["a", "b"]);
        assert_eq!(config.twitter.api_base, "https://api.twitter.com/2");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 5000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_collect_numbered_tokens_skips_gaps() {
        let env: HashMap<&str, &str> = [
            ("TWITTER_BEARER_TOKEN_1", "first"),
            ("TWITTER_BEARER_TOKEN_3", "third"),
            ("TWITTER_BEARER_TOKEN_4", "  "),
            ("TWITTER_BEARER_TOKEN", "single"),
        ]
        .into_iter()
        .collect();

        let tokens = collect_bearer_tokens(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(tokens, vec!["first", "third"]);
    }

    #[test]
    fn test_collect_single_token_fallback() {
        let tokens = collect_bearer_tokens(|name| {
            (name == "TWITTER_BEARER_TOKEN").then(|| "only".to_string())
        });
        assert_eq!(tokens, vec!["only"]);

        let none = collect_bearer_tokens(|_| None);
        assert!(none.is_empty());
    }
}
