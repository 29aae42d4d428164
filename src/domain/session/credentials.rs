//! Inputs and outputs of the identity operations.

use secrecy::SecretString;
use serde::Serialize;

use super::{Session, User};
use crate::domain::foundation::AuthError;

/// Email/password pair as typed into the sign-in or sign-up form.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    /// Builds credentials, rejecting blank fields before any provider call.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, AuthError> {
        let email = email.into().trim().to_string();
        let password = password.into();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(Self {
            email,
            password: SecretString::new(password),
        })
    }
}

/// Optional profile hints stored as user metadata on sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignUpMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl SignUpMetadata {
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }
}

/// What the provider returns from sign-up and sign-in.
///
/// Sign-up may yield a user without a session when the provider requires
/// email confirmation first.
#[derive(Debug, Clone, Default)]
pub struct AuthResponse {
    pub session: Option<Session>,
    pub user: Option<User>,
}

impl AuthResponse {
    pub fn with_session(session: Session) -> Self {
        let user = session.user.clone();
        Self {
            session: Some(session),
            user: Some(user),
        }
    }

    pub fn user_only(user: User) -> Self {
        Self {
            session: None,
            user: Some(user),
        }
    }

    /// The user, whether it came bare or inside the session.
    pub fn user(&self) -> Option<&User> {
        self.user
            .as_ref()
            .or_else(|| self.session.as_ref().map(|s| &s.user))
    }
}
