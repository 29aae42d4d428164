//! Startup sequencing configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::StartupSettings;

const MAX_SETTLE_DELAY_MS: u64 = 5_000;

/// Startup timing knobs
#[derive(Debug, Clone, Deserialize)]
pub struct StartupConfig {
    /// Pause after the session fetch before the provider counts as ready
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// Bound on each provider/record-store call in seconds; 0 disables
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_secs: u64,
}

impl StartupConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn provider_timeout(&self) -> Option<Duration> {
        match self.provider_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Settings for the startup sequencer and identity handlers
    pub fn settings(&self) -> StartupSettings {
        StartupSettings::default()
            .with_settle_delay(self.settle_delay())
            .with_provider_timeout(self.provider_timeout())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.settle_delay_ms > MAX_SETTLE_DELAY_MS {
            return Err(ValidationError::SettleDelayTooLong);
        }
        Ok(())
    }
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay(),
            provider_timeout_secs: default_provider_timeout(),
        }
    }
}

fn default_settle_delay() -> u64 {
    100
}

fn default_provider_timeout() -> u64 {
    10
}
