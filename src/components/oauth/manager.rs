use super::client::AuthorizedClient;
use super::token::{OAuthToken, TokenResponse};
use super::token_store::TokenStore;
use crate::config::Config;
use crate::error::{config_error, oauth_error, AppResult};
use chrono::Utc;
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Read-only access to the user's calendars
pub const CALENDAR_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";

/// OAuth client registration and provider endpoints
#[derive(Clone)]
pub struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub scopes: Vec<String>,
}

impl OAuthSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_url: config.redirect_url.clone(),
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
            scopes: vec![CALENDAR_READONLY_SCOPE.to_string()],
        }
    }
}

/// Owns the OAuth client configuration and the token lifecycle
#[derive(Clone)]
pub struct OAuthManager {
    settings: Arc<OAuthSettings>,
    auth_endpoint: Url,
    client: Client,
    store: TokenStore,
}

impl OAuthManager {
    pub fn new(settings: OAuthSettings, store: TokenStore) -> AppResult<Self> {
        let auth_endpoint = Url::parse(&settings.auth_url)
            .map_err(|e| config_error(&format!("Invalid OAuth auth URL: {}", e)))?;
        Url::parse(&settings.token_url)
            .map_err(|e| config_error(&format!("Invalid OAuth token URL: {}", e)))?;

        Ok(Self {
            settings: Arc::new(settings),
            auth_endpoint,
            client: Client::new(),
            store,
        })
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Consent URL for the given anti-forgery state
    pub fn authorization_url(&self, state: &str) -> Url {
        let mut url = self.auth_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("access_type", "offline")
            .append_pair("client_id", &self.settings.client_id)
            .append_pair("redirect_uri", &self.settings.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.settings.scopes.join(" "))
            .append_pair("state", state);
        url
    }

    /// Exchange an authorization code for a token and persist it
    pub async fn exchange_code(&self, code: &str) -> AppResult<OAuthToken> {
        let token = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.settings.redirect_url.as_str()),
            ])
            .await?;

        self.store.save(&token).await?;
        info!(
            "Authorization code exchanged, token saved to {}",
            self.store.path().display()
        );
        Ok(token)
    }

    /// Obtain a new access token using a refresh token
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<OAuthToken> {
        let mut token = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .await?;

        // Providers usually keep the old refresh token valid without resending it
        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token.to_string());
        }

        debug!("Access token refreshed");
        Ok(token)
    }

    /// Wrap a token in a client that authorizes and refreshes transparently
    pub fn client_from_token(&self, token: OAuthToken) -> AuthorizedClient {
        AuthorizedClient::new(self.clone(), token)
    }

    /// Rebuild the authorized client from the persisted token
    pub async fn restore(&self) -> AppResult<AuthorizedClient> {
        let token = self.store.load().await?;
        Ok(self.client_from_token(token))
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> AppResult<OAuthToken> {
        let mut form = vec![
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
        ];
        form.extend_from_slice(params);

        let response = self
            .client
            .post(self.settings.token_url.as_str())
            .form(&form)
            .send()
            .await
            .map_err(|e| oauth_error(&format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(oauth_error(&format!(
                "Token endpoint returned HTTP {} - {}",
                status, error_body
            )));
        }

        let issued_at = Utc::now();
        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| oauth_error(&format!("Failed to parse token response: {}", e)))?;

        Ok(parsed.into_token(issued_at))
    }
}
