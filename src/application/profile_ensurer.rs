//! Profile Ensurer - guarantees a profile row exists for a signed-in user.
//!
//! Best effort: a missing profile must never block authentication, so every
//! failure here is logged and swallowed. Nothing is retried automatically;
//! the next startup or sign-in tries again.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::profile::UserProfile;
use crate::ports::ProfileRepository;

/// What an ensure/create call ended up doing. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    AlreadyPresent,
    Created,
    Failed,
}

/// Creates default profiles on demand.
pub struct ProfileEnsurer {
    repository: Arc<dyn ProfileRepository>,
}

impl ProfileEnsurer {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    /// Create-if-absent. Idempotent: a second call for the same user finds
    /// the row and inserts nothing.
    pub async fn ensure(&self, user_id: &UserId) -> EnsureOutcome {
        match self.repository.find_by_id(user_id).await {
            Ok(Some(_)) => EnsureOutcome::AlreadyPresent,
            Ok(None) => self.create_default(user_id).await,
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Error ensuring user profile");
                EnsureOutcome::Failed
            }
        }
    }

    /// Blind insert of the default profile, as done right after sign-up.
    ///
    /// A duplicate row means the profile is already there.
    pub async fn create_default(&self, user_id: &UserId) -> EnsureOutcome {
        let profile = UserProfile::with_defaults(user_id.clone());
        match self.repository.insert(&profile).await {
            Ok(()) => {
                tracing::info!(user_id = %user_id, "Created default user profile");
                EnsureOutcome::Created
            }
            Err(e) if e.is_conflict() => {
                tracing::debug!(user_id = %user_id, "User profile already exists");
                EnsureOutcome::AlreadyPresent
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Error creating user profile");
                EnsureOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    struct MockProfileRepository {
        profiles: Mutex<Vec<UserProfile>>,
        inserts: AtomicUsize,
        fail_lookup: bool,
        fail_insert: bool,
    }

    impl MockProfileRepository {
        fn new() -> Self {
            Self {
                profiles: Mutex::new(Vec::new()),
                inserts: AtomicUsize::new(0),
                fail_lookup: false,
                fail_insert: false,
            }
        }

        fn failing_lookup() -> Self {
            Self {
                fail_lookup: true,
                ..Self::new()
            }
        }

        fn failing_insert() -> Self {
            Self {
                fail_insert: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl ProfileRepository for MockProfileRepository {
        async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
            if self.fail_lookup {
                return Err(DomainError::new(ErrorCode::DatabaseError, "lookup failed"));
            }
            Ok(self.profiles.lock().await.iter().find(|p| p.id() == id).cloned())
        }

        async fn insert(&self, profile: &UserProfile) -> Result<(), DomainError> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            if self.fail_insert {
                return Err(DomainError::new(ErrorCode::DatabaseError, "insert failed"));
            }
            let mut profiles = self.profiles.lock().await;
            if profiles.iter().any(|p| p.id() == profile.id()) {
                return Err(DomainError::new(ErrorCode::Conflict, "duplicate key"));
            }
            profiles.push(profile.clone());
            Ok(())
        }
    }

    fn user_id() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn ensure_creates_missing_profile_with_defaults() {
        let repo = Arc::new(MockProfileRepository::new());
        let ensurer = ProfileEnsurer::new(repo.clone());

        assert_eq!(ensurer.ensure(&user_id()).await, EnsureOutcome::Created);

        let profiles = repo.profiles.lock().await;
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0], UserProfile::with_defaults(user_id()));
    }

    #[tokio::test]
    async fn ensure_is_idempotent() {
        let repo = Arc::new(MockProfileRepository::new());
        let ensurer = ProfileEnsurer::new(repo.clone());

        ensurer.ensure(&user_id()).await;
        let second = ensurer.ensure(&user_id()).await;

        assert_eq!(second, EnsureOutcome::AlreadyPresent);
        assert_eq!(repo.inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn lookup_failure_is_swallowed_without_insert() {
        let repo = Arc::new(MockProfileRepository::failing_lookup());
        let ensurer = ProfileEnsurer::new(repo.clone());

        assert_eq!(ensurer.ensure(&user_id()).await, EnsureOutcome::Failed);
        assert_eq!(repo.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn insert_failure_is_swallowed() {
        let ensurer = ProfileEnsurer::new(Arc::new(MockProfileRepository::failing_insert()));
        assert_eq!(ensurer.ensure(&user_id()).await, EnsureOutcome::Failed);
    }

    #[tokio::test]
    async fn create_default_treats_duplicate_as_already_present() {
        let repo = Arc::new(MockProfileRepository::new());
        let ensurer = ProfileEnsurer::new(repo.clone());

        assert_eq!(ensurer.create_default(&user_id()).await, EnsureOutcome::Created);
        assert_eq!(
            ensurer.create_default(&user_id()).await,
            EnsureOutcome::AlreadyPresent
        );
        assert_eq!(repo.inserts.load(Ordering::SeqCst), 2);
        assert_eq!(repo.profiles.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn create_default_reports_other_insert_errors_as_failure() {
        let ensurer = ProfileEnsurer::new(Arc::new(MockProfileRepository::failing_insert()));
        assert_eq!(ensurer.create_default(&user_id()).await, EnsureOutcome::Failed);
    }
}
