//! AccessTokenSource port - bearer tokens for calls made on the user's behalf.

use async_trait::async_trait;
use secrecy::SecretString;

/// Supplies the access token of the current session, if any.
///
/// Record-store adapters use it so row-level security sees the signed-in
/// user instead of the anonymous role.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Option<SecretString>;
}
