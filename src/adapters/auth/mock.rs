//! In-memory identity provider for tests and local demos.
//!
//! Implements the `IdentityProvider` port without a network: accounts live
//! in a map, the "current" session in a slot, and every sign-in/sign-out is
//! broadcast to subscribers just like a real provider's auth-state feed.
//!
//! # Example
//!
//! ```ignore
//! use sherpa_shell::adapters::auth::MockIdentityProvider;
//!
//! let provider = MockIdentityProvider::new()
//!     .with_account("ada@example.com", "correct horse", "user-ada")
//!     .signed_in_as("ada@example.com");
//!
//! let session = provider.current_session().await?;
//! assert!(session.is_some());
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::Value;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::domain::foundation::{AuthError, UserId};
use crate::domain::session::{
    AuthEvent, AuthResponse, Credentials, Session, SessionChange, SignUpMetadata, User,
    UserMetadata,
};
use crate::ports::{IdentityProvider, SessionSubscription};

/// Shortest password the mock accepts on sign-up.
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user: User,
}

/// Mock identity provider.
///
/// Errors and latency can be injected per operation to exercise the
/// controller's failure paths.
#[derive(Debug)]
pub struct MockIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    current: RwLock<Option<Session>>,
    changes: broadcast::Sender<SessionChange>,
    session_error: RwLock<Option<AuthError>>,
    sign_out_error: RwLock<Option<AuthError>>,
    session_delay: Option<Duration>,
    operation_delay: Option<Duration>,
    requires_confirmation: bool,
}

impl MockIdentityProvider {
    /// Creates a provider with no accounts and nobody signed in.
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(32);
        Self {
            accounts: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
            changes,
            session_error: RwLock::new(None),
            sign_out_error: RwLock::new(None),
            session_delay: None,
            operation_delay: None,
            requires_confirmation: false,
        }
    }

    /// Registers an account.
    pub fn with_account(
        mut self,
        email: impl Into<String>,
        password: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        let email = email.into();
        let Ok(id) = UserId::new(user_id) else {
            return self;
        };
        let account = Account {
            password: password.into(),
            user: User::new(id, email.clone()),
        };
        self.accounts.get_mut().insert(email, account);
        self
    }

    /// Starts with a live session for an already registered account.
    pub fn signed_in_as(mut self, email: &str) -> Self {
        let session = self
            .accounts
            .get_mut()
            .get(email)
            .map(|account| issue_session(&account.user));
        *self.current.get_mut() = session;
        self
    }

    /// `current_session` fails with this error.
    pub fn with_session_error(mut self, error: AuthError) -> Self {
        *self.session_error.get_mut() = Some(error);
        self
    }

    /// `sign_out` fails with this error.
    pub fn with_sign_out_error(mut self, error: AuthError) -> Self {
        *self.sign_out_error.get_mut() = Some(error);
        self
    }

    /// `current_session` sleeps this long before answering.
    pub fn with_session_delay(mut self, delay: Duration) -> Self {
        self.session_delay = Some(delay);
        self
    }

    /// Sign-up, sign-in and sign-out sleep this long before answering.
    pub fn with_operation_delay(mut self, delay: Duration) -> Self {
        self.operation_delay = Some(delay);
        self
    }

    /// Sign-up returns a user but no session, as with email confirmation.
    pub fn requiring_confirmation(mut self) -> Self {
        self.requires_confirmation = true;
        self
    }

    /// Clears any injected `current_session` error.
    pub async fn clear_session_error(&self) {
        *self.session_error.write().await = None;
    }

    /// Simulates a provider-side change (token refresh, remote sign-out).
    pub async fn push_change(&self, change: SessionChange) {
        *self.current.write().await = change.session.clone();
        self.broadcast(change);
    }

    /// Number of open subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.changes.receiver_count()
    }

    /// Number of registered accounts.
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }

    fn broadcast(&self, change: SessionChange) {
        // No subscribers is fine; the change is simply unobserved.
        let _ = self.changes.send(change);
    }

    async fn pause(&self) {
        if let Some(delay) = self.operation_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn issue_session(user: &User) -> Session {
    Session::new(
        format!("access-{}", Uuid::new_v4()),
        format!("refresh-{}", Uuid::new_v4()),
        user.clone(),
    )
}

fn metadata_from(metadata: Option<&SignUpMetadata>) -> UserMetadata {
    let mut out = UserMetadata::new();
    if let Some(metadata) = metadata {
        if let Some(username) = &metadata.username {
            out.insert("username", Value::String(username.clone()));
        }
        if let Some(full_name) = &metadata.full_name {
            out.insert("full_name", Value::String(full_name.clone()));
        }
    }
    out
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        if let Some(delay) = self.session_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.session_error.read().await.clone() {
            return Err(error);
        }
        Ok(self.current.read().await.clone())
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        metadata: Option<&SignUpMetadata>,
    ) -> Result<AuthResponse, AuthError> {
        self.pause().await;

        let password = credentials.password.expose_secret();
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let user = {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&credentials.email) {
                return Err(AuthError::UserAlreadyExists);
            }
            let id = UserId::new(Uuid::new_v4().to_string())
                .map_err(|e| AuthError::provider(500, e.to_string()))?;
            let user = User::new(id, credentials.email.clone()).with_metadata(metadata_from(metadata));
            accounts.insert(
                credentials.email.clone(),
                Account {
                    password: password.to_string(),
                    user: user.clone(),
                },
            );
            user
        };

        if self.requires_confirmation {
            return Ok(AuthResponse::user_only(user));
        }

        let session = issue_session(&user);
        *self.current.write().await = Some(session.clone());
        self.broadcast(SessionChange::signed_in(session.clone()));
        Ok(AuthResponse::with_session(session))
    }

    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthResponse, AuthError> {
        self.pause().await;

        let user = {
            let accounts = self.accounts.read().await;
            match accounts.get(&credentials.email) {
                Some(account) if account.password == credentials.password.expose_secret().as_str() => {
                    account.user.clone()
                }
                _ => return Err(AuthError::InvalidCredentials),
            }
        };

        let session = issue_session(&user);
        *self.current.write().await = Some(session.clone());
        self.broadcast(SessionChange::signed_in(session.clone()));
        Ok(AuthResponse::with_session(session))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.pause().await;

        if let Some(error) = self.sign_out_error.read().await.clone() {
            return Err(error);
        }
        *self.current.write().await = None;
        self.broadcast(SessionChange::new(AuthEvent::SignedOut, None));
        Ok(())
    }

    fn subscribe(&self) -> SessionSubscription {
        SessionSubscription::new(self.changes.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials::new(email, password).unwrap()
    }

    #[tokio::test]
    async fn signed_in_as_restores_session() {
        let provider = MockIdentityProvider::new()
            .with_account("ada@example.com", "correct horse", "user-ada")
            .signed_in_as("ada@example.com");

        let session = provider.current_session().await.unwrap().unwrap();
        assert_eq!(session.user_id().as_str(), "user-ada");
    }

    #[tokio::test]
    async fn sign_in_broadcasts_session() {
        let provider =
            MockIdentityProvider::new().with_account("ada@example.com", "correct horse", "user-ada");
        let mut subscription = provider.subscribe();

        provider
            .sign_in_with_password(&creds("ada@example.com", "correct horse"))
            .await
            .unwrap();

        let change = subscription.next_change().await.unwrap();
        assert_eq!(change.event, AuthEvent::SignedIn);
        assert_eq!(change.session.unwrap().user_id().as_str(), "user-ada");
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let provider =
            MockIdentityProvider::new().with_account("ada@example.com", "correct horse", "user-ada");

        let wrong_password = provider
            .sign_in_with_password(&creds("ada@example.com", "nope"))
            .await
            .unwrap_err();
        let unknown = provider
            .sign_in_with_password(&creds("bob@example.com", "correct horse"))
            .await
            .unwrap_err();

        assert_eq!(wrong_password, AuthError::InvalidCredentials);
        assert_eq!(unknown, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn sign_up_rejects_weak_password_and_duplicates() {
        let provider = MockIdentityProvider::new();

        let weak = provider.sign_up(&creds("ada@example.com", "123"), None).await;
        assert!(matches!(weak, Err(AuthError::WeakPassword(_))));

        provider
            .sign_up(&creds("ada@example.com", "correct horse"), None)
            .await
            .unwrap();
        let duplicate = provider
            .sign_up(&creds("ada@example.com", "correct horse"), None)
            .await;
        assert_eq!(duplicate.unwrap_err(), AuthError::UserAlreadyExists);
        assert_eq!(provider.account_count().await, 1);
    }

    #[tokio::test]
    async fn sign_up_stores_metadata() {
        let provider = MockIdentityProvider::new();
        let metadata = SignUpMetadata::default()
            .with_username("ada")
            .with_full_name("Ada Lovelace");

        let response = provider
            .sign_up(&creds("ada@example.com", "correct horse"), Some(&metadata))
            .await
            .unwrap();

        let user = response.user().unwrap();
        assert_eq!(user.metadata.username(), Some("ada"));
        assert_eq!(user.metadata.full_name(), Some("Ada Lovelace"));
    }

    #[tokio::test]
    async fn sign_out_clears_session_and_broadcasts() {
        let provider = MockIdentityProvider::new()
            .with_account("ada@example.com", "correct horse", "user-ada")
            .signed_in_as("ada@example.com");
        let mut subscription = provider.subscribe();

        provider.sign_out().await.unwrap();

        assert!(provider.current_session().await.unwrap().is_none());
        assert!(!subscription.next_change().await.unwrap().has_session());
    }

    #[tokio::test]
    async fn dropping_subscription_unsubscribes() {
        let provider = MockIdentityProvider::new();
        let subscription = provider.subscribe();
        assert_eq!(provider.subscriber_count(), 1);

        drop(subscription);
        assert_eq!(provider.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn injected_session_error_can_be_cleared() {
        let provider =
            MockIdentityProvider::new().with_session_error(AuthError::service_unavailable("down"));
        assert!(provider.current_session().await.is_err());

        provider.clear_session_error().await;
        assert!(provider.current_session().await.unwrap().is_none());
    }
}
