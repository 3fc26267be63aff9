//! Domain error types

use thiserror::Error;

/// Error when an invalid retention policy is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid retention policy: \"{input}\". Valid policies are: retain, evict_on_read")]
pub struct InvalidRetentionError {
    pub input: String,
}

/// Error when an invalid poll backoff is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid poll backoff: \"{input}\". Valid values are: fixed, exponential")]
pub struct InvalidBackoffError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },
}
