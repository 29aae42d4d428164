//! In-memory profile repository.
//!
//! Stores profiles in a map. Useful for tests and local runs; failure
//! and latency knobs let tests drive the ensurer's error paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::profile::UserProfile;
use crate::ports::ProfileRepository;

/// In-memory `user_profiles` table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
    inserts: Arc<AtomicUsize>,
    fail_lookups: bool,
    fail_inserts: bool,
    latency: Option<Duration>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a profile without counting it as an insert.
    pub fn with_profile(self, profile: UserProfile) -> Self {
        if let Ok(mut profiles) = self.profiles.try_write() {
            profiles.insert(profile.id.clone(), profile);
        }
        self
    }

    /// Every lookup fails with a database error.
    pub fn failing_lookups(mut self) -> Self {
        self.fail_lookups = true;
        self
    }

    /// Every insert fails with a database error.
    pub fn failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }

    /// Delays every call, simulating a slow network.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn contains(&self, id: &UserId) -> bool {
        self.profiles.read().await.contains_key(id)
    }

    pub async fn get(&self, id: &UserId) -> Option<UserProfile> {
        self.profiles.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    /// Number of successful inserts since creation.
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        self.simulate_latency().await;
        if self.fail_lookups {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated lookup failure",
            ));
        }
        Ok(self.profiles.read().await.get(id).cloned())
    }

    async fn insert(&self, profile: &UserProfile) -> Result<(), DomainError> {
        self.simulate_latency().await;
        if self.fail_inserts {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated insert failure",
            ));
        }

        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Profile already exists: {}", profile.id),
            ));
        }
        profiles.insert(profile.id.clone(), profile.clone());
        self.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
