//! Settings errors.

use std::io;
use thiserror::Error;

/// Errors loading, saving or validating a [`Config`](crate::Config).
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    #[error("Failed to save settings: {0}")]
    SaveError(String),

    /// A value outside what a joint can be built from.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl SettingsError {
    /// An [`InvalidSetting`](Self::InvalidSetting) for the dotted `key`.
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SettingsError::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Errors about the settings file format.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Only `.json` and `.toml` files are read and written.
    #[error("Unsupported config format '{0}', expected json or toml")]
    UnsupportedFormat(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
