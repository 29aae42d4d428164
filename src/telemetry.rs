//! Tracing subscriber setup.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TelemetryConfig;

static INITIALIZED: OnceCell<bool> = OnceCell::new();

/// Installs the global subscriber once per process.
///
/// `RUST_LOG` takes precedence over the configured filter. Returns `false`
/// when another subscriber was already installed, e.g. by a test harness.
pub fn init_tracing(config: &TelemetryConfig) -> bool {
    *INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        let (json, plain) = if config.json {
            (Some(fmt::layer().json().with_current_span(false)), None)
        } else {
            (None, Some(fmt::layer().with_target(true)))
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(json)
            .with(plain)
            .try_init()
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        let config = TelemetryConfig::default();
        let first = init_tracing(&config);
        let second = init_tracing(&config);
        assert_eq!(first, second);
    }
}
