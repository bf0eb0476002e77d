//! Configuration management for nexus-auth
//!
//! Built-in defaults, overridden by an optional `nexus-auth.toml`, overridden by
//! `NEXUS_AUTH_*` environment variables.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file stem, resolved relative to the working directory
const DEFAULT_CONFIG_FILE: &str = "nexus-auth";

/// Complete credential store configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AuthConfig {
    // ═══ STORAGE LAYOUT (Environment Override Supported) ═══
    /// Directory holding the file-backed storage partition
    pub storage_dir: String,

    /// Key holding the serialized credential records
    pub users_key: String,

    /// Key holding the active session
    pub session_key: String,

    // ═══ INPUT LIMITS ═══
    pub max_username_length: usize,
    pub max_secret_length: usize,

    /// Compare-and-swap attempts before an insert gives up
    pub max_retries: usize,

    /// Maximum console command length
    pub max_command_length: usize,

    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            storage_dir: "./nexus-data".to_string(),
            users_key: "users".to_string(),
            session_key: "user".to_string(),
            max_username_length: 64,
            max_secret_length: 256,
            max_retries: 3,
            max_command_length: 512,
            log_level: "info".to_string(),
        }
    }
}

impl AuthConfig {
    /// Load configuration from nexus-auth.toml (if present) with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE), false)
    }

    /// Load configuration from an explicit file.
    ///
    /// When `required` is false a missing file falls back to the defaults.
    pub fn load_from(path: &Path, required: bool) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(Config::try_from(&AuthConfig::default())?)
            .add_source(File::from(path).required(required))
            .add_source(Environment::with_prefix("NEXUS_AUTH").try_parsing(true))
            .build()?;

        let config: AuthConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.storage_dir.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "storage_dir cannot be empty".into(),
            ));
        }

        if self.users_key.is_empty() || self.session_key.is_empty() {
            return Err(config::ConfigError::Message(
                "users_key and session_key cannot be empty".into(),
            ));
        }

        if self.users_key == self.session_key {
            return Err(config::ConfigError::Message(
                "users_key and session_key must differ".into(),
            ));
        }

        if self.max_username_length == 0 || self.max_secret_length == 0 {
            return Err(config::ConfigError::Message(
                "Input length limits must be greater than 0".into(),
            ));
        }

        if self.max_retries == 0 {
            return Err(config::ConfigError::Message(
                "max_retries must be greater than 0".into(),
            ));
        }

        if self.max_command_length == 0 {
            return Err(config::ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get storage directory as PathBuf
    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_dir)
    }
}
