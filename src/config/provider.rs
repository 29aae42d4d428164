//! Identity provider and record store configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::environment::Environment;
use super::error::ValidationError;

/// Which backend the shell talks to.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    /// Supabase-compatible project over HTTP.
    #[default]
    Remote,
    /// In-process mock provider and profile store.
    Memory,
}

/// Backend configuration (GoTrue auth + PostgREST records)
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub mode: ProviderMode,

    /// Project base URL (e.g., "https://xyz.supabase.co")
    #[serde(default)]
    pub url: String,

    /// Public anon key
    #[serde(default = "empty_secret")]
    pub anon_key: SecretString,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ProviderConfig {
    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_in_memory(&self) -> bool {
        self.mode == ProviderMode::Memory
    }

    /// Validate provider configuration
    ///
    /// Memory mode needs nothing else but is refused in production.
    /// Remote mode needs a URL and anon key; production requires HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.is_in_memory() {
            if environment.is_production() {
                return Err(ValidationError::MemoryInProduction);
            }
            return Ok(());
        }

        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("PROVIDER__URL"));
        }
        if self.anon_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PROVIDER__ANON_KEY"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidProviderUrl);
        }
        if environment.is_production() && !self.url.starts_with("https://") {
            return Err(ValidationError::ProviderUrlMustBeHttps);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            mode: ProviderMode::default(),
            url: String::new(),
            anon_key: empty_secret(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_request_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(url: &str) -> ProviderConfig {
        ProviderConfig {
            url: url.to_string(),
            anon_key: SecretString::new("anon".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_provider_config_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.mode, ProviderMode::Remote);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_validation_missing_url() {
        let config = ProviderConfig::default();
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("PROVIDER__URL"))
        );
    }

    #[test]
    fn test_validation_missing_anon_key() {
        let config = ProviderConfig {
            url: "https://xyz.supabase.co".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("PROVIDER__ANON_KEY"))
        );
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        assert_eq!(
            remote("xyz.supabase.co").validate(&Environment::Development),
            Err(ValidationError::InvalidProviderUrl)
        );
    }

    #[test]
    fn test_validation_production_requires_https() {
        let config = remote("http://localhost:54321");
        // Allowed in development
        assert!(config.validate(&Environment::Development).is_ok());
        // Rejected in production
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::ProviderUrlMustBeHttps)
        );
    }

    #[test]
    fn test_validation_in_memory() {
        let config = ProviderConfig {
            mode: ProviderMode::Memory,
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::MemoryInProduction)
        );
    }

    #[test]
    fn test_validation_invalid_timeout() {
        let config = ProviderConfig {
            request_timeout_secs: 0,
            ..remote("https://xyz.supabase.co")
        };
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::InvalidTimeout)
        );
    }
}
