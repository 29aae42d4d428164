//! Identity provider port.
//!
//! The shell never verifies credentials or issues tokens itself; it
//! delegates every identity operation to an `IdentityProvider` and keeps a
//! cached copy of whatever session the provider reports.
//!
//! # Subscription contract
//!
//! `subscribe()` delivers only changes that happen *after* the call. A
//! provider must not replay the session it already returned from
//! `current_session()`; the startup sequence fetches that explicitly.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::foundation::AuthError;
use crate::domain::session::{AuthResponse, Credentials, Session, SessionChange, SignUpMetadata};

/// Remote identity provider (GoTrue, an in-memory mock, ...).
///
/// # Contract
///
/// Implementations must:
/// - Return `Ok(None)` from `current_session` when nobody is signed in
/// - Return `AuthError::InvalidCredentials` for a rejected password
/// - Return `AuthError::UserAlreadyExists` when signing up a taken email
/// - Push a `SessionChange` to subscribers on every sign-in and sign-out
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Session the provider currently holds, if any.
    async fn current_session(&self) -> Result<Option<Session>, AuthError>;

    /// Register a new account.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        metadata: Option<&SignUpMetadata>,
    ) -> Result<AuthResponse, AuthError>;

    /// Exchange email/password for a session.
    async fn sign_in_with_password(&self, credentials: &Credentials)
        -> Result<AuthResponse, AuthError>;

    /// Invalidate the current session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Open a change subscription. Dropping the returned handle unsubscribes.
    fn subscribe(&self) -> SessionSubscription;
}

/// Receiving end of a provider's session change feed.
#[derive(Debug)]
pub struct SessionSubscription {
    receiver: broadcast::Receiver<SessionChange>,
}

impl SessionSubscription {
    pub fn new(receiver: broadcast::Receiver<SessionChange>) -> Self {
        Self { receiver }
    }

    /// Waits for the next change. Returns `None` once the provider is gone.
    ///
    /// If the listener fell behind, the overwritten changes are dropped and
    /// delivery resumes at the oldest change still buffered; later changes
    /// follow in order. Each change replaces the session wholesale, so a
    /// store fed from here still ends on the newest session.
    pub async fn next_change(&mut self) -> Option<SessionChange> {
        loop {
            match self.receiver.recv().await {
                Ok(change) => return Some(change),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Session subscription lagged, overwritten changes dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
