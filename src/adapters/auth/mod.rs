//! Identity provider adapters.
//!
//! Implementations of the `IdentityProvider` port:
//!
//! - `mock` - In-memory provider for tests and local runs
//! - `gotrue` - Supabase Auth (GoTrue) over HTTP

mod gotrue;
mod mock;

pub use gotrue::{GoTrueConfig, GoTrueIdentityProvider};
pub use mock::MockIdentityProvider;
