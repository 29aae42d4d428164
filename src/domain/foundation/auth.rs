//! Authentication errors for the domain layer.
//!
//! These errors are **domain-centric** - they describe what went wrong from
//! the shell's perspective, not the identity provider's. Any provider
//! (GoTrue, Zitadel, an in-memory mock) maps its failures onto them, and the
//! presentation layer renders them as form feedback.

use thiserror::Error;

/// Errors returned by sign-up, sign-in and sign-out.
///
/// These are **fatal to the caller**: every identity operation hands them
/// back instead of swallowing them, so the user can act on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email/password pair was rejected.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// Sign-up attempted for an email that already has an account.
    #[error("User already registered")]
    UserAlreadyExists,

    /// Credentials are valid but the account is waiting on email confirmation.
    #[error("Email not confirmed")]
    EmailNotConfirmed,

    /// The provider has no live session to act on.
    #[error("No active session")]
    SessionNotFound,

    /// Provider rejected the password on sign-up.
    #[error("Password too weak: {0}")]
    WeakPassword(String),

    /// Too many attempts in a short window.
    #[error("Too many requests, try again later")]
    RateLimited,

    /// The provider did not answer within the configured bound.
    #[error("Identity provider timed out")]
    Timeout,

    /// The identity provider is unreachable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Any other provider-side rejection, preserved verbatim.
    #[error("Identity provider error ({status}): {message}")]
    Provider { status: u16, message: String },
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Creates a provider error carrying the upstream status code.
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: message.into(),
        }
    }

    /// Returns true if the user can fix this by changing what they typed.
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::UserAlreadyExists
                | AuthError::EmailNotConfirmed
                | AuthError::WeakPassword(_)
        )
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AuthError::ServiceUnavailable(_) | AuthError::Timeout | AuthError::RateLimited
        )
    }
}
