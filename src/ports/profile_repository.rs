//! ProfileRepository port for the `user_profiles` record store

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, UserId},
    profile::UserProfile,
};

/// Remote store of per-user profiles.
///
/// # Contract
///
/// - `find_by_id` returns `Ok(None)` for an unknown id, never `NotFound`
/// - `insert` returns an `ErrorCode::Conflict` error when the id is taken
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by user ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Insert a new profile
    async fn insert(&self, profile: &UserProfile) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_repository_is_object_safe() {
        fn _assert_trait_object(_: &dyn ProfileRepository) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn ProfileRepository>>();
    }
}
