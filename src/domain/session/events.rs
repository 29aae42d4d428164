//! Session change notifications pushed by the identity provider.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Session;

/// Why the provider pushed a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

impl fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuthEvent::InitialSession => "INITIAL_SESSION",
            AuthEvent::SignedIn => "SIGNED_IN",
            AuthEvent::SignedOut => "SIGNED_OUT",
            AuthEvent::TokenRefreshed => "TOKEN_REFRESHED",
            AuthEvent::UserUpdated => "USER_UPDATED",
        };
        write!(f, "{}", s)
    }
}

/// One provider-pushed change. The carried session replaces the cached one
/// wholesale; `None` means signed out.
#[derive(Debug, Clone)]
pub struct SessionChange {
    pub event: AuthEvent,
    pub session: Option<Session>,
}

impl SessionChange {
    pub fn new(event: AuthEvent, session: Option<Session>) -> Self {
        Self { event, session }
    }

    pub fn signed_in(session: Session) -> Self {
        Self::new(AuthEvent::SignedIn, Some(session))
    }

    pub fn signed_out() -> Self {
        Self::new(AuthEvent::SignedOut, None)
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::session::User;

    #[test]
    fn auth_event_displays_wire_name() {
        assert_eq!(AuthEvent::SignedIn.to_string(), "SIGNED_IN");
        assert_eq!(AuthEvent::TokenRefreshed.to_string(), "TOKEN_REFRESHED");
    }

    #[test]
    fn auth_event_serializes_like_display() {
        let json = serde_json::to_string(&AuthEvent::SignedOut).unwrap();
        assert_eq!(json, "\"SIGNED_OUT\"");
    }

    #[test]
    fn signed_out_carries_no_session() {
        let change = SessionChange::signed_out();
        assert_eq!(change.event, AuthEvent::SignedOut);
        assert!(!change.has_session());
    }

    #[test]
    fn signed_in_carries_session() {
        let user = User::new(UserId::new("u").unwrap(), "u@example.com");
        let change = SessionChange::signed_in(Session::new("a", "r", user));
        assert!(change.has_session());
    }
}
