//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Identity providers (GoTrue over HTTP, in-memory mock)
//! - `profile` - Profile repositories (PostgREST, in-memory)
//! - `navigation` - Stack router

pub mod auth;
pub mod navigation;
pub mod profile;
