//! Error types for dnsset-core
//!
//! Centralized error handling using `thiserror` for ergonomic error definitions.
//! Per-rule problems are never errors: a rule that cannot be turned into a
//! domain is simply rejected and counted.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dnsset-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The rule feed does not exist (after the optional download attempt)
    #[error("Input file not found: {}", path.display())]
    InputNotFound {
        /// Path that was resolved for the input feed
        path: PathBuf,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the missing config file
        path: String,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    ConfigValue {
        /// Configuration key
        key: String,
        /// Error message
        message: String,
    },

    /// Invalid port number
    #[error("Invalid port number: {port} (must be 1-65535)")]
    InvalidPort {
        /// The invalid port as given
        port: String,
    },

    /// Unknown output mode
    #[error("Invalid mode: '{mode}' (expected one of: both, server, ipset)")]
    InvalidMode {
        /// The rejected mode string
        mode: String,
    },

    /// Feed download failed
    #[error("Failed to fetch '{url}': {reason}")]
    Fetch {
        /// URL that was requested
        url: String,
        /// Failure reason
        reason: String,
    },

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config value error
    pub fn config_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValue {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a fetch error
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error means the input feed is missing
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, Self::InputNotFound { .. })
    }
}
