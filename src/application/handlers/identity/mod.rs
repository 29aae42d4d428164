//! Identity command handlers: sign-up, sign-in, sign-out.
//!
//! Every failure here is fatal to the caller and comes back as an
//! `AuthError` for the UI to display.

mod sign_in;
mod sign_out;
mod sign_up;

pub use sign_in::{SignInCommand, SignInHandler};
pub use sign_out::SignOutHandler;
pub use sign_up::{SignUpCommand, SignUpHandler};

use crate::domain::foundation::AuthError;

/// Logs a failed identity operation and hands the error back.
///
/// Mistakes the user can correct are logged at `info`; anything else at `warn`.
fn log_failure(operation: &'static str, error: AuthError) -> AuthError {
    if error.is_user_actionable() {
        tracing::info!(operation, error = %error, "Identity operation rejected");
    } else {
        tracing::warn!(
            operation,
            error = %error,
            transient = error.is_transient(),
            "Identity operation failed"
        );
    }
    error
}
