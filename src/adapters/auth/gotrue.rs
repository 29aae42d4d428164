//! GoTrue adapter for the identity provider port.
//!
//! Speaks the Supabase Auth (GoTrue) REST API:
//!
//! - `POST /auth/v1/signup` - register, optionally with user metadata
//! - `POST /auth/v1/token?grant_type=password` - password sign-in
//! - `POST /auth/v1/token?grant_type=refresh_token` - refresh an expired session
//! - `POST /auth/v1/logout` - invalidate the session server-side
//!
//! Like the JavaScript client, the adapter keeps the current session in
//! memory and emits auth-state changes to local subscribers; GoTrue itself
//! pushes nothing.
//!
//! # Example
//!
//! ```ignore
//! let config = GoTrueConfig::new("https://xyz.supabase.co", "anon-key");
//! let provider = GoTrueIdentityProvider::new(config)?;
//! let response = provider.sign_in_with_password(&credentials).await?;
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::{broadcast, RwLock};

use crate::domain::foundation::{AuthError, Timestamp, UserId};
use crate::domain::session::{
    AuthEvent, AuthResponse, Credentials, Session, SessionChange, SignUpMetadata, User,
    UserMetadata,
};
use crate::ports::{AccessTokenSource, IdentityProvider, SessionSubscription};

/// Configuration for the GoTrue adapter.
#[derive(Debug, Clone)]
pub struct GoTrueConfig {
    /// Project base URL (e.g., "https://xyz.supabase.co").
    pub url: String,

    /// Public anon key sent as `apikey` on every request.
    pub anon_key: SecretString,

    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl GoTrueConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: SecretString::new(anon_key.into()),
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url.trim_end_matches('/'), path)
    }
}

/// User object as returned by GoTrue.
#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: HashMap<String, Value>,
}

impl WireUser {
    fn into_user(self) -> Result<User, AuthError> {
        let id = UserId::new(self.id)
            .map_err(|e| AuthError::provider(200, format!("Invalid user id: {e}")))?;
        Ok(User::new(id, self.email.unwrap_or_default())
            .with_metadata(UserMetadata::from_map(self.user_metadata)))
    }
}

/// Token grant response.
#[derive(Debug, Deserialize)]
struct WireSession {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    expires_in: Option<i64>,
    user: WireUser,
}

impl WireSession {
    fn into_session(self) -> Result<Session, AuthError> {
        let expires_at = self
            .expires_at
            .map(Timestamp::from_unix_secs)
            .or_else(|| self.expires_in.map(|secs| Timestamp::now().plus_secs(secs)));
        let token_type = self.token_type.unwrap_or_else(|| "bearer".to_string());
        let user = self.user.into_user()?;

        let mut session = Session::new(self.access_token, self.refresh_token, user);
        session.token_type = token_type;
        session.expires_at = expires_at;
        Ok(session)
    }
}

/// Sign-up answers with a session, or with a bare user while email
/// confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireSignUp {
    Session(WireSession),
    User(WireUser),
}

/// Error body. GoTrue has used several shapes over its versions.
#[derive(Debug, Default, Deserialize)]
struct WireError {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl WireError {
    fn code(&self) -> Option<&str> {
        self.error_code.as_deref().or(self.error.as_deref())
    }

    fn message(&self) -> String {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref())
            .or(self.error.as_deref())
            .unwrap_or("unknown error")
            .to_string()
    }
}

/// Maps a non-success GoTrue response onto the domain error.
pub(crate) fn map_error_response(status: u16, body: &str) -> AuthError {
    let wire: WireError = serde_json::from_str(body).unwrap_or_default();
    let message = wire.message();
    let lowered = message.to_lowercase();

    match wire.code() {
        Some("invalid_credentials") | Some("invalid_grant") => {
            return AuthError::InvalidCredentials
        }
        Some("user_already_exists") | Some("email_exists") => return AuthError::UserAlreadyExists,
        Some("email_not_confirmed") => return AuthError::EmailNotConfirmed,
        Some("weak_password") => return AuthError::WeakPassword(message),
        Some("session_not_found") => return AuthError::SessionNotFound,
        Some("over_request_rate_limit") => return AuthError::RateLimited,
        _ => {}
    }

    match status {
        429 => AuthError::RateLimited,
        500..=599 => AuthError::ServiceUnavailable(format!("{status}: {message}")),
        _ if lowered.contains("invalid login credentials") => AuthError::InvalidCredentials,
        _ if lowered.contains("already registered") => AuthError::UserAlreadyExists,
        _ if lowered.contains("email not confirmed") => AuthError::EmailNotConfirmed,
        _ => AuthError::provider(status, message),
    }
}

/// GoTrue-backed identity provider.
pub struct GoTrueIdentityProvider {
    config: GoTrueConfig,
    http_client: reqwest::Client,
    current: RwLock<Option<Session>>,
    changes: broadcast::Sender<SessionChange>,
}

impl GoTrueIdentityProvider {
    /// Creates the adapter. No request is made until the first operation.
    pub fn new(config: GoTrueConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                AuthError::service_unavailable(format!("Failed to create HTTP client: {e}"))
            })?;
        let (changes, _) = broadcast::channel(32);

        Ok(Self {
            config,
            http_client,
            current: RwLock::new(None),
            changes,
        })
    }

    /// Seeds a session the host already holds, e.g. handed over from a
    /// deep link. Subscribers are not notified.
    pub async fn with_session(self, session: Session) -> Self {
        *self.current.write().await = Some(session);
        self
    }

    async fn post(
        &self,
        url: &str,
        body: &Value,
        bearer: Option<&SecretString>,
    ) -> Result<reqwest::Response, AuthError> {
        let bearer = bearer.unwrap_or(&self.config.anon_key);
        let response = self
            .http_client
            .post(url)
            .header("apikey", self.config.anon_key.expose_secret().as_str())
            .bearer_auth(bearer.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("GoTrue request failed: {}", e);
                if e.is_timeout() {
                    AuthError::Timeout
                } else {
                    AuthError::service_unavailable(e.to_string())
                }
            })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let error = map_error_response(status, &body);
        tracing::debug!(status, error = %error, "GoTrue rejected request");
        Err(error)
    }

    async fn parse<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T, AuthError> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse GoTrue response: {}", e);
            AuthError::service_unavailable(format!("Malformed GoTrue response: {e}"))
        })
    }

    async fn set_current(&self, session: Option<Session>, event: AuthEvent) {
        *self.current.write().await = session.clone();
        let _ = self.changes.send(SessionChange::new(event, session));
    }

    async fn refresh(&self, refresh_token: &SecretString) -> Result<Session, AuthError> {
        let url = self.config.endpoint("token?grant_type=refresh_token");
        let body = json!({ "refresh_token": refresh_token.expose_secret() });
        let response = self.post(&url, &body, None).await?;
        Self::parse::<WireSession>(response).await?.into_session()
    }
}

#[async_trait]
impl AccessTokenSource for GoTrueIdentityProvider {
    async fn access_token(&self) -> Option<SecretString> {
        self.current
            .read()
            .await
            .as_ref()
            .map(|session| session.access_token.clone())
    }
}

#[async_trait]
impl IdentityProvider for GoTrueIdentityProvider {
    async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.current.read().await.clone() else {
            return Ok(None);
        };
        if !session.is_expired(&Timestamp::now()) {
            return Ok(Some(session));
        }

        tracing::debug!(user_id = %session.user_id(), "Session expired, refreshing");
        match self.refresh(&session.refresh_token).await {
            Ok(refreshed) => {
                self.set_current(Some(refreshed.clone()), AuthEvent::TokenRefreshed)
                    .await;
                Ok(Some(refreshed))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session refresh failed, signing out locally");
                self.set_current(None, AuthEvent::SignedOut).await;
                Err(e)
            }
        }
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        metadata: Option<&SignUpMetadata>,
    ) -> Result<AuthResponse, AuthError> {
        let url = self.config.endpoint("signup");
        let mut body = json!({
            "email": credentials.email,
            "password": credentials.password.expose_secret(),
        });
        if let Some(metadata) = metadata {
            body["data"] = serde_json::to_value(metadata)
                .map_err(|e| AuthError::provider(400, e.to_string()))?;
        }

        let response = self.post(&url, &body, None).await?;
        match Self::parse::<WireSignUp>(response).await? {
            WireSignUp::Session(wire) => {
                let session = wire.into_session()?;
                self.set_current(Some(session.clone()), AuthEvent::SignedIn)
                    .await;
                Ok(AuthResponse::with_session(session))
            }
            WireSignUp::User(wire) => Ok(AuthResponse::user_only(wire.into_user()?)),
        }
    }

    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthResponse, AuthError> {
        let url = self.config.endpoint("token?grant_type=password");
        let body = json!({
            "email": credentials.email,
            "password": credentials.password.expose_secret(),
        });

        let response = self.post(&url, &body, None).await?;
        let session = Self::parse::<WireSession>(response).await?.into_session()?;
        self.set_current(Some(session.clone()), AuthEvent::SignedIn)
            .await;
        Ok(AuthResponse::with_session(session))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let token = self.access_token().await;
        if let Some(token) = token {
            let url = self.config.endpoint("logout");
            match self.post(&url, &json!({}), Some(&token)).await {
                Ok(_) => {}
                // The server no longer knows the session; it is gone either way.
                Err(AuthError::SessionNotFound) => {}
                Err(AuthError::Provider { status: 401 | 403 | 404, .. }) => {}
                Err(e) => return Err(e),
            }
        }

        self.set_current(None, AuthEvent::SignedOut).await;
        Ok(())
    }

    fn subscribe(&self) -> SessionSubscription {
        SessionSubscription::new(self.changes.subscribe())
    }
}
