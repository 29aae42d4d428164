//! PostgREST adapter for ProfileRepository.
//!
//! Reads and writes the `user_profiles` table through the REST interface
//! a Supabase project exposes at `/rest/v1`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::profile::UserProfile;
use crate::ports::{AccessTokenSource, ProfileRepository};

const TABLE: &str = "user_profiles";

/// Connection settings for the REST record store.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project base URL (e.g., "https://xyz.supabase.co").
    pub url: String,

    /// Public anon key, sent as `apikey` and as fallback bearer.
    pub anon_key: SecretString,

    pub request_timeout: Duration,
}

impl RestConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: SecretString::new(anon_key.into()),
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), TABLE)
    }
}

/// PostgREST implementation of ProfileRepository
pub struct RestProfileRepository {
    config: RestConfig,
    http_client: reqwest::Client,
    tokens: Option<Arc<dyn AccessTokenSource>>,
}

impl RestProfileRepository {
    pub fn new(config: RestConfig) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            config,
            http_client,
            tokens: None,
        })
    }

    /// Sends the signed-in user's token instead of the anon key.
    pub fn with_token_source(mut self, tokens: Arc<dyn AccessTokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    async fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = match &self.tokens {
            Some(tokens) => tokens.access_token().await,
            None => None,
        };
        let bearer = token.unwrap_or_else(|| self.config.anon_key.clone());

        request
            .header("apikey", self.config.anon_key.expose_secret().as_str())
            .bearer_auth(bearer.expose_secret())
    }
}

fn transport_error(e: reqwest::Error) -> DomainError {
    tracing::error!("Profile store request failed: {}", e);
    DomainError::new(ErrorCode::ServiceUnavailable, e.to_string())
}

/// Maps a non-success PostgREST response onto the domain error.
pub(crate) fn map_status(status: u16, body: &str) -> DomainError {
    let code = match status {
        409 => ErrorCode::Conflict,
        401 => ErrorCode::Unauthorized,
        403 => ErrorCode::Forbidden,
        404 => ErrorCode::NotFound,
        400 | 422 => ErrorCode::ValidationFailed,
        502..=504 => ErrorCode::ServiceUnavailable,
        _ => ErrorCode::DatabaseError,
    };
    DomainError::new(code, format!("Profile store returned {}: {}", status, body))
        .with_detail("status", status.to_string())
}

#[async_trait]
impl ProfileRepository for RestProfileRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let request = self
            .http_client
            .get(self.config.table_url())
            .query(&[("id", format!("eq.{}", id)), ("select", "*".to_string())]);

        let response = self
            .authorized(request)
            .await
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status.as_u16(), &body));
        }

        let rows: Vec<UserProfile> = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to deserialize profile: {}", e),
            )
        })?;

        Ok(rows.into_iter().next())
    }

    async fn insert(&self, profile: &UserProfile) -> Result<(), DomainError> {
        let request = self
            .http_client
            .post(self.config.table_url())
            .header("Prefer", "return=minimal")
            .json(profile);

        let response = self
            .authorized(request)
            .await
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(user_id = %profile.id, "Profile row inserted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_status(status.as_u16(), &body))
    }
}
