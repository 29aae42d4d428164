//! SignIn - Command handler for password sign-in.

use std::sync::Arc;
use std::time::Duration;

use super::log_failure;
use crate::application::deadline::within;
use crate::application::profile_ensurer::{EnsureOutcome, ProfileEnsurer};
use crate::domain::foundation::AuthError;
use crate::domain::session::{AuthResponse, Credentials};
use crate::ports::IdentityProvider;

/// Command to sign in with email and password.
#[derive(Debug, Clone)]
pub struct SignInCommand {
    pub credentials: Credentials,
}

/// Handler for password sign-in.
///
/// Ensures (create-if-absent) the user's profile after a successful
/// sign-in. The session itself reaches the store through the provider's
/// change feed, not through this handler.
pub struct SignInHandler {
    identity: Arc<dyn IdentityProvider>,
    ensurer: Arc<ProfileEnsurer>,
    timeout: Option<Duration>,
}

impl SignInHandler {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        ensurer: Arc<ProfileEnsurer>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            identity,
            ensurer,
            timeout,
        }
    }

    pub async fn handle(&self, cmd: SignInCommand) -> Result<AuthResponse, AuthError> {
        let response = within(self.timeout, self.identity.sign_in_with_password(&cmd.credentials))
            .await
            .map_err(|_| AuthError::Timeout)
            .and_then(|result| result)
            .map_err(|e| log_failure("sign_in", e))?;

        if let Some(user) = response.user() {
            tracing::info!(user_id = %user.id, "Sign in succeeded");
            within(self.timeout, self.ensurer.ensure(&user.id))
                .await
                .unwrap_or_else(|_| {
                    tracing::warn!(user_id = %user.id, "Profile check timed out");
                    EnsureOutcome::Failed
                });
        }

        Ok(response)
    }
}
