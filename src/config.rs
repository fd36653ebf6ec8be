//! Configuration file parsing
//!
//! Parses TOML configuration files for the hashdrop server.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server settings
    pub server: ServerConfig,

    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Comma-separated set of accepted request hosts
    pub allowed_hosts: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage settings
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Backend type
    #[serde(default)]
    pub backend: BackendType,

    /// File backend settings
    #[serde(default)]
    pub file: Option<FileBackendConfig>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendType::Memory,
            file: None,
        }
    }
}

/// Backend type
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    #[default]
    Memory,
    File,
}

/// File backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FileBackendConfig {
    /// Directory holding the stored entries
    pub path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: default_bind(),
                allowed_hosts: String::new(),
                log_level: default_log_level(),
            },
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The configured allowlist as a set of host values
    pub fn allowed_host_set(&self) -> HashSet<String> {
        self.server
            .allowed_hosts
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_host_set().is_empty() {
            return Err(ConfigError::Invalid(
                "allowed_hosts must list at least one host".to_string(),
            ));
        }

        match self.storage.backend {
            BackendType::Memory => {}
            BackendType::File => {
                if self.storage.file.is_none() {
                    return Err(ConfigError::Invalid(
                        "file backend requires a [storage.file] section".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }
}
