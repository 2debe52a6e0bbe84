use super::manager::OAuthManager;
use super::token::OAuthToken;
use crate::error::{oauth_error, AppResult};
use reqwest::header::AUTHORIZATION;
use reqwest::Response;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use url::Url;

/// HTTP client that attaches the bearer token and refreshes it when expired
#[derive(Clone)]
pub struct AuthorizedClient {
    manager: OAuthManager,
    token: Arc<Mutex<OAuthToken>>,
}

impl fmt::Debug for AuthorizedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizedClient")
            .field("token_file", &self.manager.store().path())
            .finish_non_exhaustive()
    }
}

impl AuthorizedClient {
    pub(crate) fn new(manager: OAuthManager, token: OAuthToken) -> Self {
        Self {
            manager,
            token: Arc::new(Mutex::new(token)),
        }
    }

    /// Current token, refreshed first if it has expired
    pub async fn token(&self) -> AppResult<OAuthToken> {
        // Held across the refresh so concurrent callers wait for a single request
        let mut token = self.token.lock().await;

        if token.is_expired() {
            let refresh_token = token
                .refresh_token
                .clone()
                .ok_or_else(|| oauth_error("Access token expired and no refresh token is available"))?;

            info!("Access token expired, refreshing");
            let fresh = self.manager.refresh(&refresh_token).await?;

            if let Err(e) = self.manager.store().save(&fresh).await {
                warn!("Failed to persist refreshed token: {}", e);
            }
            *token = fresh;
        }

        Ok(token.clone())
    }

    /// Authorized GET request
    pub async fn get(&self, url: Url) -> AppResult<Response> {
        let token = self.token().await?;
        let response = self
            .manager
            .http()
            .get(url)
            .header(AUTHORIZATION, token.authorization_header())
            .send()
            .await?;
        Ok(response)
    }
}
