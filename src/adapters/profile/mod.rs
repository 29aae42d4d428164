//! Profile repository adapters
//!
//! - `in_memory` - Map-backed store for tests and local runs
//! - `rest` - PostgREST `user_profiles` table

mod in_memory;
mod rest;

pub use in_memory::InMemoryProfileRepository;
pub use rest::{RestConfig, RestProfileRepository};
