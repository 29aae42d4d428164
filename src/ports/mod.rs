//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the shell and the outside world. Adapters implement these ports.
//!
//! - `IdentityProvider` - Session retrieval, sign-up/in/out, change feed
//! - `ProfileRepository` - Per-user profile records
//! - `Navigator` - Host router (replace, current location)
//! - `AccessTokenSource` - Bearer token for user-scoped requests

mod access_token_source;
mod identity_provider;
mod navigator;
mod profile_repository;

pub use access_token_source::AccessTokenSource;
pub use identity_provider::{IdentityProvider, SessionSubscription};
pub use navigator::Navigator;
pub use profile_repository::ProfileRepository;
