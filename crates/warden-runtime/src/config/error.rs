//! Configuration errors.
//!
//! # Error Codes
//!
//! | Variant | Code |
//! |---------|------|
//! | [`ConfigError::ReadFile`] | `CONFIG_READ_FILE` |
//! | [`ConfigError::ParseToml`] | `CONFIG_PARSE_TOML` |
//! | [`ConfigError::InvalidEnvVar`] | `CONFIG_INVALID_ENV_VAR` |
//! | [`ConfigError::InvalidName`] | `CONFIG_INVALID_NAME` |
//! | [`ConfigError::InvalidAlias`] | `CONFIG_INVALID_ALIAS` |
//!
//! None is recoverable: each needs the file or the environment fixed.

use std::path::PathBuf;
use thiserror::Error;
use warden_types::{ErrorCode, NameError};

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config file '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid environment variable value.
    #[error("invalid value for environment variable '{name}': {message}")]
    InvalidEnvVar { name: String, message: String },

    /// An action or subject name in the config failed validation.
    #[error("invalid name at '{field}': {source}")]
    InvalidName {
        field: String,
        #[source]
        source: NameError,
    },

    /// An alias entry that can never take effect.
    #[error("invalid alias for '{target}': {message}")]
    InvalidAlias { target: String, message: String },
}

impl ConfigError {
    /// Creates a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse TOML error.
    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid env var error.
    pub fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid name error for the config field `field`.
    pub fn invalid_name(field: impl Into<String>, source: NameError) -> Self {
        Self::InvalidName {
            field: field.into(),
            source,
        }
    }

    /// Creates an invalid alias error.
    pub fn invalid_alias(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAlias {
            target: target.into(),
            message: message.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "CONFIG_READ_FILE",
            Self::ParseToml { .. } => "CONFIG_PARSE_TOML",
            Self::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
            Self::InvalidName { .. } => "CONFIG_INVALID_NAME",
            Self::InvalidAlias { .. } => "CONFIG_INVALID_ALIAS",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
