//! Session Store - the shell's single source of session and readiness state.
//!
//! Owned explicitly and passed around as `Arc<SessionStore>`; consumers
//! that need to react to changes (route guard, presentation layer) hold a
//! `watch::Receiver<SessionState>` from [`SessionStore::subscribe`].

use tokio::sync::watch;

use crate::domain::foundation::StateMachine;
use crate::domain::readiness::{Readiness, ReadinessFlags};
use crate::domain::session::{Session, User};

/// Snapshot of everything the store holds.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub session: Option<Session>,
    pub user: Option<User>,
    pub readiness: ReadinessFlags,
}

impl SessionState {
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// The initial session fetch has completed.
    pub fn initialized(&self) -> bool {
        self.readiness.provider.is_ready()
    }

    pub fn shell_ready(&self) -> bool {
        self.readiness.shell.is_ready()
    }

    /// Both latches are set and the guard is live.
    pub fn is_ready(&self) -> bool {
        self.readiness.all_ready()
    }
}

/// Holder of [`SessionState`] with one setter per field.
///
/// Writers are trusted; nothing is validated beyond types. Every session
/// write notifies subscribers. Readiness writes notify only when the latch
/// actually flips.
#[derive(Debug)]
pub struct SessionStore {
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { state }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every subsequent write.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn session(&self) -> Option<Session> {
        self.state.borrow().session.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// Replaces the session; the user is re-derived from it.
    pub fn set_session(&self, session: Option<Session>) {
        self.state.send_modify(|state| {
            state.user = session.as_ref().map(|s| s.user.clone());
            state.session = session;
        });
    }

    /// Sets `provider_ready`. Returns true only for the call that flipped it.
    pub fn mark_provider_ready(&self) -> bool {
        self.state
            .send_if_modified(|state| flip(&mut state.readiness.provider))
    }

    /// Sets `shell_ready`. Returns true only for the call that flipped it.
    pub fn mark_shell_ready(&self) -> bool {
        self.state
            .send_if_modified(|state| flip(&mut state.readiness.shell))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn flip(latch: &mut Readiness) -> bool {
    match latch.transition_to(Readiness::Ready) {
        Ok(next) => {
            *latch = next;
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn session(id: &str) -> Session {
        Session::new("a", "r", User::new(UserId::new(id).unwrap(), format!("{id}@example.com")))
    }

    #[test]
    fn new_store_is_empty_and_not_ready() {
        let state = SessionStore::new().snapshot();

        assert!(state.session.is_none());
        assert!(state.user.is_none());
        assert!(!state.initialized());
        assert!(!state.shell_ready());
    }

    #[test]
    fn set_session_derives_user() {
        let store = SessionStore::new();

        store.set_session(Some(session("user-1")));
        assert_eq!(store.user().unwrap().id.as_str(), "user-1");

        store.set_session(None);
        assert!(store.user().is_none());
        assert!(store.session().is_none());
    }

    #[test]
    fn readiness_latches_flip_exactly_once() {
        let store = SessionStore::new();

        assert!(store.mark_provider_ready());
        assert!(!store.mark_provider_ready());
        assert!(store.mark_shell_ready());
        assert!(!store.mark_shell_ready());
        assert!(store.snapshot().is_ready());
    }

    #[tokio::test]
    async fn every_session_write_notifies_subscribers() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.set_session(None);
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        store.set_session(Some(session("user-2")));
        rx.changed().await.unwrap();
        assert!(rx.borrow().has_session());
    }

    #[tokio::test]
    async fn repeated_readiness_write_does_not_notify() {
        let store = SessionStore::new();
        store.mark_shell_ready();

        let rx = store.subscribe();
        store.mark_shell_ready();
        assert!(!rx.has_changed().unwrap());
    }
}
