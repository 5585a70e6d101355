//! Configuration management for paydesk
//!
//! This module handles loading, validation, and management of
//! paydesk configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::{ConfigError, ConfigErrorCode, ConfigResult};

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
    8081
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL (sqlite)
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// Private in-memory database, used by tests and throwaway demos.
    ///
    /// Every sqlite connection to `:memory:` gets its own database, so the
    /// pool is pinned to a single connection.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

fn default_database_url() -> String {
    "sqlite://paydesk.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

/// Pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size when a list request omits `take`
    #[serde(default = "default_take")]
    pub default_take: u64,
    /// Upper bound for `take`; larger requests are clamped
    #[serde(default = "default_max_take")]
    pub max_take: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_take: default_take(),
            max_take: default_max_take(),
        }
    }
}

fn default_take() -> u64 {
    10
}

fn default_max_take() -> u64 {
    1000
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
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Pagination settings
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
            message: e.to_string(),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid(
                "server.port",
                "Port must be greater than 0",
            ));
        }

        if self.database.url.trim().is_empty() {
            return Err(ConfigError::invalid(
                "database.url",
                "Database URL must not be empty",
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::invalid(
                "database.max_connections",
                "Pool must allow at least one connection",
            ));
        }

        if self.pagination.max_take == 0 {
            return Err(ConfigError::invalid(
                "pagination.max_take",
                "Maximum page size must be at least 1",
            ));
        }

        if self.pagination.default_take == 0 || self.pagination.default_take > self.pagination.max_take {
            return Err(ConfigError::invalid(
                "pagination.default_take",
                "Default page size must be between 1 and pagination.max_take",
            ));
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.pagination.default_take, 10);
        assert_eq!(config.pagination.max_take, 1000);
    }

    #[test]
    fn test_template_matches_defaults() {
        let config = Config::from_yaml(Config::generate_default()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.server.host, defaults.server.host);
        assert_eq!(config.server.port, defaults.server.port);
        assert_eq!(config.database.url, defaults.database.url);
        assert_eq!(config.database.max_connections, defaults.database.max_connections);
        assert_eq!(config.pagination.default_take, defaults.pagination.default_take);
        assert_eq!(config.pagination.max_take, defaults.pagination.max_take);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("server:\n  port: 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.pagination.max_take, 1000);
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_yaml("server:\n  port: 0\n").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidValue);
    }

    #[test]
    fn test_default_take_above_max() {
        let err = Config::from_yaml("pagination:\n  default_take: 50\n  max_take: 20\n").unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "pagination.default_take"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_yaml() {
        let err = Config::from_yaml("server: [").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/definitely/not/here/config.yaml").unwrap_err();
        assert_eq!(err.code(), ConfigErrorCode::FileNotFound);
    }
}
