//! Domain layer containing the shell's business rules and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors, state machines)
//! - `session` - Cached session/user, provider change events, credentials
//! - `profile` - Per-user application profile and its defaults
//! - `readiness` - One-way startup latches
//! - `navigation` - Routes, the redirect rule and tab resolution

pub mod foundation;
pub mod navigation;
pub mod profile;
pub mod readiness;
pub mod session;
