//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SHERPA_SHELL` prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use sherpa_shell::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Identity provider at {}", config.provider.url);
//! ```

mod environment;
mod error;
mod provider;
mod startup;
mod telemetry;

pub use environment::Environment;
pub use error::{ConfigError, ValidationError};
pub use provider::{ProviderConfig, ProviderMode};
pub use startup::StartupConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "SHERPA_SHELL";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    /// Identity provider and record store
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Startup timing
    #[serde(default)]
    pub startup: StartupConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SHERPA_SHELL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SHERPA_SHELL__PROVIDER__URL=...` -> `provider.url = ...`
    /// - `SHERPA_SHELL__STARTUP__SETTLE_DELAY_MS=50` -> `startup.settle_delay_ms = 50`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();
        Self::from_environment()
    }

    /// Load configuration after reading variables from a specific env file.
    ///
    /// Variables already present in the process environment win over the file.
    pub fn load_from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::from_path(path.as_ref())?;
        Self::from_environment()
    }

    fn from_environment() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.provider.validate(&self.environment)?;
        self.startup.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;
    use std::time::Duration;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "SHERPA_SHELL__ENVIRONMENT",
        "SHERPA_SHELL__PROVIDER__MODE",
        "SHERPA_SHELL__PROVIDER__URL",
        "SHERPA_SHELL__PROVIDER__ANON_KEY",
        "SHERPA_SHELL__STARTUP__SETTLE_DELAY_MS",
        "SHERPA_SHELL__STARTUP__PROVIDER_TIMEOUT_SECS",
        "SHERPA_SHELL__TELEMETRY__JSON",
    ];

    /// Helper to set environment variables for testing
    fn set_minimal_env() {
        env::set_var("SHERPA_SHELL__PROVIDER__URL", "https://xyz.supabase.co");
        env::set_var("SHERPA_SHELL__PROVIDER__ANON_KEY", "anon-key");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.provider.url, "https://xyz.supabase.co");
        assert_eq!(config.provider.anon_key.expose_secret(), "anon-key");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.startup.settle_delay(), Duration::from_millis(100));
        assert!(!config.telemetry.json);
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SHERPA_SHELL__STARTUP__SETTLE_DELAY_MS", "25");
        env::set_var("SHERPA_SHELL__STARTUP__PROVIDER_TIMEOUT_SECS", "0");
        env::set_var("SHERPA_SHELL__TELEMETRY__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.startup.settle_delay_ms, 25);
        assert_eq!(config.startup.provider_timeout(), None);
        assert!(config.telemetry.json);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SHERPA_SHELL__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_memory_mode_needs_no_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SHERPA_SHELL__PROVIDER__MODE", "memory");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.provider.is_in_memory());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_env_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "SHERPA_SHELL__PROVIDER__URL=http://localhost:54321").unwrap();
        writeln!(file, "SHERPA_SHELL__PROVIDER__ANON_KEY=local-anon").unwrap();
        writeln!(file, "SHERPA_SHELL__STARTUP__SETTLE_DELAY_MS=0").unwrap();

        let result = AppConfig::load_from_env_file(file.path());
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.provider.url, "http://localhost:54321");
        assert_eq!(config.startup.settle_delay_ms, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_env_file_is_an_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let result = AppConfig::load_from_env_file("/nonexistent/sherpa-shell.env");
        assert!(matches!(result, Err(ConfigError::EnvFile(_))));
    }
}
