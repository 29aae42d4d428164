//! Application layer - Session state, startup, route guard and handlers.
//!
//! This layer sequences the ports: it restores the session at startup,
//! keeps the Session Store in step with the provider's change feed, and
//! redirects through the navigator whenever the session and the current
//! screen disagree.

mod deadline;

pub mod controller;
pub mod handlers;
pub mod profile_ensurer;
pub mod route_guard;
pub mod session_listener;
pub mod session_store;
pub mod startup;
pub mod tab_bar;

pub use controller::SessionController;
pub use handlers::{SignInCommand, SignInHandler, SignOutHandler, SignUpCommand, SignUpHandler};
pub use profile_ensurer::{EnsureOutcome, ProfileEnsurer};
pub use route_guard::RouteGuard;
pub use session_listener::SessionListener;
pub use session_store::{SessionState, SessionStore};
pub use startup::{StartupReport, StartupSequencer, StartupSettings};
pub use tab_bar::TabBar;
