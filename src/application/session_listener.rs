//! Applies provider-pushed session changes to the store.

use std::sync::Arc;

use tokio::sync::watch;

use super::session_store::SessionStore;
use crate::ports::SessionSubscription;

/// Long-lived consumer of a [`SessionSubscription`].
///
/// Each change replaces the cached session wholesale. Profiles are not
/// re-checked here; that happens only at startup and on sign-in.
pub struct SessionListener {
    subscription: SessionSubscription,
    store: Arc<SessionStore>,
}

impl SessionListener {
    pub fn new(subscription: SessionSubscription, store: Arc<SessionStore>) -> Self {
        Self {
            subscription,
            store,
        }
    }

    /// Runs until shutdown is signalled or the provider closes the feed.
    ///
    /// The subscription is dropped on return, which unsubscribes.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        if *shutdown.borrow() {
            return;
        }

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("Session listener shutting down");
                        return;
                    }
                }

                change = self.subscription.next_change() => {
                    let Some(change) = change else {
                        tracing::debug!("Identity provider closed the session feed");
                        return;
                    };
                    tracing::debug!(
                        event = %change.event,
                        has_session = change.has_session(),
                        "Session changed"
                    );
                    self.store.set_session(change.session);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::session::{Session, SessionChange, User};
    use std::time::Duration;
    use tokio::sync::broadcast;

    fn session() -> Session {
        Session::new("a", "r", User::new(UserId::new("u-1").unwrap(), "u@example.com"))
    }

    #[tokio::test]
    async fn applies_changes_to_store() {
        let store = Arc::new(SessionStore::new());
        let (tx, rx) = broadcast::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut states = store.subscribe();

        let listener = SessionListener::new(SessionSubscription::new(rx), store.clone());
        let handle = tokio::spawn(listener.run(shutdown_rx));

        tx.send(SessionChange::signed_in(session())).unwrap();
        states.changed().await.unwrap();
        assert!(states.borrow_and_update().has_session());

        tx.send(SessionChange::signed_out()).unwrap();
        states.changed().await.unwrap();
        assert!(!states.borrow().has_session());

        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn shutdown_releases_subscription() {
        let store = Arc::new(SessionStore::new());
        let (tx, rx) = broadcast::channel::<SessionChange>(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let listener = SessionListener::new(SessionSubscription::new(rx), store);
        let handle = tokio::spawn(listener.run(shutdown_rx));
        assert_eq!(tx.receiver_count(), 1);

        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(tx.receiver_count(), 0);
    }
}
