//! SignOut - Command handler for ending the session.

use std::sync::Arc;
use std::time::Duration;

use super::log_failure;
use crate::application::deadline::within;
use crate::domain::foundation::AuthError;
use crate::ports::IdentityProvider;

/// Handler for sign-out.
///
/// Does not touch the Session Store: the provider's `SignedOut` change is
/// what clears the cached session.
pub struct SignOutHandler {
    identity: Arc<dyn IdentityProvider>,
    timeout: Option<Duration>,
}

impl SignOutHandler {
    pub fn new(identity: Arc<dyn IdentityProvider>, timeout: Option<Duration>) -> Self {
        Self { identity, timeout }
    }

    pub async fn handle(&self) -> Result<(), AuthError> {
        within(self.timeout, self.identity.sign_out())
            .await
            .map_err(|_| AuthError::Timeout)
            .and_then(|result| result)
            .map_err(|e| log_failure("sign_out", e))?;

        tracing::info!("Signed out");
        Ok(())
    }
}
