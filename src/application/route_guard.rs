//! Route Guard - keeps the current screen consistent with the session.
//!
//! Re-evaluates on every Session Store change, including the change that
//! makes both readiness latches true. While either latch is false it does
//! nothing and the shell keeps showing its splash screen.

use std::sync::Arc;

use tokio::sync::watch;

use super::session_store::SessionState;
use crate::domain::navigation::{decide_redirect, RedirectDecision};
use crate::ports::Navigator;

/// Issues history-replacing redirects through a [`Navigator`].
pub struct RouteGuard {
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    /// Evaluates one state snapshot against the current location.
    ///
    /// A redirect target always differs from the current location, so
    /// repeated evaluation of the same state settles after one replace.
    pub fn evaluate(&self, state: &SessionState) -> RedirectDecision {
        let location = self.navigator.current_location();
        let decision = decide_redirect(state.readiness, state.has_session(), &location);

        if let RedirectDecision::Redirect(target) = &decision {
            tracing::info!(
                from = %location,
                to = %target,
                has_session = state.has_session(),
                "Redirecting"
            );
            self.navigator.replace(target);
        }

        decision
    }

    /// Evaluates the current state, then again after every change, until
    /// shutdown is signalled or the store goes away.
    pub async fn run(
        &self,
        mut states: watch::Receiver<SessionState>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        loop {
            if *shutdown.borrow() {
                return;
            }

            let state = states.borrow_and_update().clone();
            self.evaluate(&state);

            tokio::select! {
                changed = states.changed() => {
                    if changed.is_err() {
                        tracing::debug!("Session store dropped, route guard stopping");
                        return;
                    }
                }

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::debug!("Route guard shutting down");
                        return;
                    }
                }
            }
        }
    }
}
