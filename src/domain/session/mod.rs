//! Session domain module.
//!
//! The shell's cached view of the identity provider's state: the session
//! and its embedded user, the change notifications the provider pushes, and
//! the inputs/outputs of sign-up, sign-in and sign-out.

mod credentials;
mod events;
mod model;

pub use credentials::{AuthResponse, Credentials, SignUpMetadata};
pub use events::{AuthEvent, SessionChange};
pub use model::{Session, User, UserMetadata};
