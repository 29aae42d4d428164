//! Application handlers.
//!
//! Command handlers that orchestrate the identity provider and the profile
//! store.

pub mod identity;

pub use identity::{SignInCommand, SignInHandler, SignOutHandler, SignUpCommand, SignUpHandler};
