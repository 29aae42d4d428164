//! SessionController - the presentation boundary of the shell.
//!
//! Wires the Session Store, Startup Sequencer, Route Guard and identity
//! handlers together. Creating a controller spawns startup and the guard;
//! dropping it (or calling [`SessionController::shutdown`]) stops both, along
//! with the session listener, and releases the provider subscription.
//!
//! # Example
//!
//! ```ignore
//! let controller = SessionController::start(identity, profiles, navigator, settings);
//! controller.wait_until_ready().await;
//!
//! controller.sign_in_with_password("ada@example.com", "correct horse").await?;
//! ```

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::handlers::identity::{
    SignInCommand, SignInHandler, SignOutHandler, SignUpCommand, SignUpHandler,
};
use super::profile_ensurer::ProfileEnsurer;
use super::route_guard::RouteGuard;
use super::session_store::{SessionState, SessionStore};
use super::startup::{StartupReport, StartupSequencer, StartupSettings};
use crate::domain::foundation::AuthError;
use crate::domain::session::{AuthResponse, Credentials, Session, SignUpMetadata, User};
use crate::ports::{IdentityProvider, Navigator, ProfileRepository};

/// Session & route-guard controller.
pub struct SessionController {
    store: Arc<SessionStore>,
    sign_up: SignUpHandler,
    sign_in: SignInHandler,
    sign_out: SignOutHandler,
    shutdown: watch::Sender<bool>,
    sequencer: Arc<StartupSequencer>,
    startup: Option<JoinHandle<StartupReport>>,
    guard: Option<JoinHandle<()>>,
}

impl SessionController {
    /// Builds the controller and spawns startup and the route guard.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        navigator: Arc<dyn Navigator>,
        settings: StartupSettings,
    ) -> Self {
        let store = Arc::new(SessionStore::new());
        let ensurer = Arc::new(ProfileEnsurer::new(profiles));
        let (shutdown, shutdown_rx) = watch::channel(false);

        let guard = {
            let guard = RouteGuard::new(navigator);
            let states = store.subscribe();
            let shutdown_rx = shutdown_rx.clone();
            tokio::spawn(async move { guard.run(states, shutdown_rx).await })
        };

        let timeout = settings.provider_timeout;
        let sequencer = Arc::new(StartupSequencer::new(
            Arc::clone(&identity),
            Arc::clone(&ensurer),
            Arc::clone(&store),
            settings,
        ));
        let startup = {
            let sequencer = Arc::clone(&sequencer);
            tokio::spawn(async move { sequencer.run(shutdown_rx).await })
        };

        Self {
            sign_up: SignUpHandler::new(Arc::clone(&identity), Arc::clone(&ensurer), timeout),
            sign_in: SignInHandler::new(Arc::clone(&identity), ensurer, timeout),
            sign_out: SignOutHandler::new(identity, timeout),
            store,
            shutdown,
            sequencer,
            startup: Some(startup),
            guard: Some(guard),
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn state(&self) -> SessionState {
        self.store.snapshot()
    }

    /// Receiver for the presentation layer to re-render on.
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.store.subscribe()
    }

    pub fn session(&self) -> Option<Session> {
        self.store.session()
    }

    pub fn user(&self) -> Option<User> {
        self.store.user()
    }

    /// The initial session fetch has completed.
    pub fn initialized(&self) -> bool {
        self.store.snapshot().initialized()
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Option<SignUpMetadata>,
    ) -> Result<AuthResponse, AuthError> {
        let credentials = Credentials::new(email, password)?;
        self.sign_up
            .handle(SignUpCommand {
                credentials,
                metadata,
            })
            .await
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthError> {
        let credentials = Credentials::new(email, password)?;
        self.sign_in.handle(SignInCommand { credentials }).await
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_out.handle().await
    }

    /// Hook for the presentation layer once its first paint is prepared.
    ///
    /// Returns true when the splash screen may be hidden, i.e. both
    /// readiness latches are now set.
    pub fn on_first_paint_complete(&self) -> bool {
        self.store.mark_shell_ready();
        self.store.snapshot().is_ready()
    }

    /// Resolves once both readiness latches are set.
    pub async fn wait_until_ready(&self) {
        let mut states = self.store.subscribe();
        // The store outlives this call, so the channel cannot close here.
        let _ = states.wait_for(SessionState::is_ready).await;
    }

    /// Stops every background task and waits for them to wind down.
    ///
    /// Returns the startup report if startup had already finished; an
    /// unfinished startup is cancelled (its shell-ready finalizer still runs).
    pub async fn shutdown(mut self) -> Option<StartupReport> {
        let _ = self.shutdown.send(true);

        let report = match self.startup.take() {
            Some(startup) => {
                startup.abort();
                startup.await.ok()
            }
            None => None,
        };
        if let Some(guard) = self.guard.take() {
            let _ = guard.await;
        }
        // The listener saw the shutdown signal; joining it releases the subscription.
        if let Some(listener) = self.sequencer.take_listener() {
            let _ = listener.await;
        }
        report
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
        if let Some(startup) = self.startup.take() {
            startup.abort();
        }
        if let Some(guard) = self.guard.take() {
            guard.abort();
        }
        if let Some(listener) = self.sequencer.take_listener() {
            listener.abort();
        }
    }
}
