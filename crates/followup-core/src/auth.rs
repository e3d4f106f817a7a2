//! Access credentials for the backing Drive store.

use crate::Result;
use crate::error::FollowupError;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

/// Supplies a currently valid bearer credential for the private
/// application storage area.
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

/// Refreshing OAuth token provider.
///
/// Holds a long-lived refresh token and exchanges it for short-lived
/// access tokens, caching the current one until shortly before expiry.
pub struct OauthTokenProvider {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    token_url: String,
    cached: RwLock<Option<CachedToken>>,
}

impl OauthTokenProvider {
    pub const GOOGLE_TOKEN_URL: &'static str = "https://oauth2.googleapis.com/token";

    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            token_url: Self::GOOGLE_TOKEN_URL.to_string(),
            cached: RwLock::new(None),
        }
    }

    /// Point the provider at a non-Google token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    async fn refresh(&self) -> Result<CachedToken> {
        if self.client_id.is_empty() || self.refresh_token.is_empty() {
            return Err(FollowupError::Unauthenticated);
        }

        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", self.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FollowupError::SessionExpired);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|_| FollowupError::SessionExpired)?;

        debug!(target: "followup::auth", "refreshed access token");
        Ok(CachedToken {
            value: token.access_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        })
    }
}

impl TokenProvider for OauthTokenProvider {
    fn access_token(&self) -> impl Future<Output = Result<String>> + Send {
        async move {
            // Refresh 30s early to absorb clock skew.
            let deadline = Utc::now() + Duration::seconds(30);
            if let Some(cached) = self.cached.read().await.as_ref() {
                if cached.expires_at > deadline {
                    return Ok(cached.value.clone());
                }
            }

            let fresh = self.refresh().await?;
            let value = fresh.value.clone();
            *self.cached.write().await = Some(fresh);
            Ok(value)
        }
    }
}
