//! SignUp - Command handler for registering a new account.

use std::sync::Arc;
use std::time::Duration;

use super::log_failure;
use crate::application::deadline::within;
use crate::application::profile_ensurer::{EnsureOutcome, ProfileEnsurer};
use crate::domain::foundation::AuthError;
use crate::domain::session::{AuthResponse, Credentials, SignUpMetadata};
use crate::ports::IdentityProvider;

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct SignUpCommand {
    pub credentials: Credentials,
    pub metadata: Option<SignUpMetadata>,
}

/// Handler for sign-up.
///
/// On success the default profile is inserted right away (a fresh insert,
/// not create-if-absent). Insert failures are logged and never reach the
/// caller; provider failures always do.
pub struct SignUpHandler {
    identity: Arc<dyn IdentityProvider>,
    ensurer: Arc<ProfileEnsurer>,
    timeout: Option<Duration>,
}

impl SignUpHandler {
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

    pub async fn handle(&self, cmd: SignUpCommand) -> Result<AuthResponse, AuthError> {
        let result = within(
            self.timeout,
            self.identity.sign_up(&cmd.credentials, cmd.metadata.as_ref()),
        )
        .await
        .map_err(|_| AuthError::Timeout)
        .and_then(|result| result);

        let response = result.map_err(|e| log_failure("sign_up", e))?;

        tracing::info!(
            user_id = ?response.user().map(|u| u.id.as_str()),
            has_session = response.session.is_some(),
            "Sign up succeeded"
        );

        if let Some(user) = response.user() {
            within(self.timeout, self.ensurer.create_default(&user.id))
                .await
                .unwrap_or_else(|_| {
                    tracing::warn!(user_id = %user.id, "Profile insert timed out");
                    EnsureOutcome::Failed
                });
        }

        Ok(response)
    }
}
