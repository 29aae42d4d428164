//! Session and user snapshots as cached by the shell.

use std::collections::HashMap;

use secrecy::SecretString;
use serde_json::Value;

use crate::domain::foundation::{Timestamp, UserId};

/// Free-form user metadata the provider stores alongside the account.
///
/// Sign-up writes `username` and `full_name` here; everything else is
/// carried through untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserMetadata(HashMap<String, Value>);

impl UserMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: HashMap<String, Value>) -> Self {
        Self(map)
    }

    /// Returns a string-valued entry, ignoring non-string values.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn username(&self) -> Option<&str> {
        self.get_str("username")
    }

    pub fn full_name(&self) -> Option<&str> {
        self.get_str("full_name")
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn as_map(&self) -> &HashMap<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The user embedded in a session.
///
/// Never exists on its own in the shell: the store derives it from
/// whichever session it currently holds.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub metadata: UserMetadata,
}

impl User {
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            metadata: UserMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: UserMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns the username, or email as fallback.
    pub fn display_name(&self) -> &str {
        self.metadata.username().unwrap_or(&self.email)
    }
}

/// Live proof of authentication issued by the identity provider.
///
/// Tokens are wrapped in [`SecretString`] so a logged session never leaks
/// credentials. The shell never inspects token contents; expiry is whatever
/// the provider reported.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
    pub token_type: String,
    pub expires_at: Option<Timestamp>,
    pub user: User,
}

impl Session {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        user: User,
    ) -> Self {
        Self {
            access_token: SecretString::new(access_token.into()),
            refresh_token: SecretString::new(refresh_token.into()),
            token_type: "bearer".to_string(),
            expires_at: None,
            user,
        }
    }

    pub fn with_expiry(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn user_id(&self) -> &UserId {
        &self.user.id
    }

    /// True when the provider-reported expiry lies at or before `now`.
    ///
    /// Sessions without an expiry never count as expired.
    pub fn is_expired(&self, now: &Timestamp) -> bool {
        self.expires_at
            .map(|expires_at| !now.is_before(&expires_at))
            .unwrap_or(false)
    }
}
