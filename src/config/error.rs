//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Env file could not be read: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid provider URL format")]
    InvalidProviderUrl,

    #[error("Provider URL must use HTTPS in production")]
    ProviderUrlMustBeHttps,

    #[error("In-memory backend is not allowed in production")]
    MemoryInProduction,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Settle delay exceeds maximum allowed (5000 ms)")]
    SettleDelayTooLong,

    #[error("Empty log filter")]
    EmptyLogFilter,
}
