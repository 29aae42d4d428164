//! Startup Sequencer - one-time restore of the session at controller creation.
//!
//! Steps, in order:
//! 1. Fetch the provider's current session (absent is fine)
//! 2. Ensure a profile for the restored user
//! 3. Mark the provider ready
//! 4. Open the change subscription and hand it to a [`SessionListener`]
//! 5. Wait out the settle delay
//! 6. Mark the shell ready, on every exit path
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `settle_delay` | 100ms | Pause after subscribing, absorbs provider event jitter |
//! | `provider_timeout` | 10s | Bound on each provider call; `None` waits forever |
//!
//! The settle delay is a timing workaround, not an ordering guarantee. The
//! subscription contract on [`IdentityProvider`] (no replay of the initial
//! session) is what keeps the first guard evaluation correct.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::deadline::within;
use super::profile_ensurer::{EnsureOutcome, ProfileEnsurer};
use super::session_listener::SessionListener;
use super::session_store::SessionStore;
use crate::domain::foundation::UserId;
use crate::ports::IdentityProvider;

/// Timing knobs for startup and the identity operations.
#[derive(Debug, Clone)]
pub struct StartupSettings {
    /// Pause between opening the subscription and marking the shell ready.
    pub settle_delay: Duration,

    /// Upper bound on each provider call.
    pub provider_timeout: Option<Duration>,
}

impl Default for StartupSettings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(100),
            provider_timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl StartupSettings {
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.provider_timeout = timeout;
        self
    }
}

/// What startup found, for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupReport {
    /// User of the restored session, if one was restored.
    pub restored_user: Option<UserId>,

    /// Result of the profile check for the restored user.
    pub profile: Option<EnsureOutcome>,

    /// Why startup fell back to "no session", if it did.
    pub degraded: Option<String>,
}

/// Sets `shell_ready` when dropped.
///
/// Held for the whole sequence so the latch flips on success, on early
/// return, on panic unwinding and when the startup task is aborted.
struct ShellReadyGuard {
    store: Arc<SessionStore>,
}

impl Drop for ShellReadyGuard {
    fn drop(&mut self) {
        if self.store.mark_shell_ready() {
            tracing::debug!("Shell marked ready");
        }
    }
}

/// Runs the startup steps against injected collaborators.
pub struct StartupSequencer {
    identity: Arc<dyn IdentityProvider>,
    ensurer: Arc<ProfileEnsurer>,
    store: Arc<SessionStore>,
    settings: StartupSettings,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl StartupSequencer {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        ensurer: Arc<ProfileEnsurer>,
        store: Arc<SessionStore>,
        settings: StartupSettings,
    ) -> Self {
        Self {
            identity,
            ensurer,
            store,
            settings,
            listener: Mutex::new(None),
        }
    }

    /// Handle of the listener task, once startup has spawned it.
    ///
    /// The task stops when `shutdown` fires; the owner awaits or aborts it.
    pub fn take_listener(&self) -> Option<JoinHandle<()>> {
        self.listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Runs the sequence once. `shutdown` is forwarded to the listener task.
    pub async fn run(&self, shutdown: watch::Receiver<bool>) -> StartupReport {
        let _shell_ready = ShellReadyGuard {
            store: Arc::clone(&self.store),
        };
        let mut report = StartupReport::default();

        match within(self.settings.provider_timeout, self.identity.current_session()).await {
            Ok(Ok(session)) => {
                report.restored_user = session.as_ref().map(|s| s.user.id.clone());
                self.store.set_session(session);
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Failed to fetch initial session");
                report.degraded = Some(e.to_string());
            }
            Err(_) => {
                tracing::warn!(
                    timeout = ?self.settings.provider_timeout,
                    "Initial session fetch timed out"
                );
                report.degraded = Some("initial session fetch timed out".to_string());
            }
        }

        if let Some(user_id) = &report.restored_user {
            let outcome = within(self.settings.provider_timeout, self.ensurer.ensure(user_id))
                .await
                .unwrap_or_else(|_| {
                    tracing::warn!(user_id = %user_id, "Profile check timed out");
                    EnsureOutcome::Failed
                });
            report.profile = Some(outcome);
        }

        self.store.mark_provider_ready();

        let listener = SessionListener::new(self.identity.subscribe(), Arc::clone(&self.store));
        let handle = tokio::spawn(listener.run(shutdown));
        *self.listener.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);

        if !self.settings.settle_delay.is_zero() {
            tokio::time::sleep(self.settings.settle_delay).await;
        }

        tracing::info!(
            restored_user = ?report.restored_user.as_ref().map(UserId::as_str),
            profile = ?report.profile,
            degraded = report.degraded.is_some(),
            "Startup sequence complete"
        );

        report
    }
}
