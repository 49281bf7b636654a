//! Google OAuth 2.0 authorization-code flow for a server-side web client.
//!
//! The login handler redirects to [`OAuthClient::authorization_url`] with a
//! random `state` that is also kept in a short-lived cookie; the callback checks
//! it and calls [`OAuthClient::exchange_code`] for the access token.

use rand::{distributions::Alphanumeric, Rng};
use reqwest::Client;
use tracing::{error, info};
use url::Url;

use crate::config::OAuthConfig;
use crate::types::external::OAuthTokenResponse;
use crate::utils::error::ApiError;

pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";

const STATE_LENGTH: usize = 32;

#[derive(Clone)]
pub struct OAuthClient {
    http: Client,
    config: OAuthConfig,
}

impl OAuthClient {
    pub fn new(http: Client, config: OAuthConfig) -> Self {
        Self { http, config }
    }

    pub fn new_state() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(STATE_LENGTH)
            .map(char::from)
            .collect()
    }

    fn credentials(&self) -> Result<(&str, &str), ApiError> {
        match (self.config.client_id.as_deref(), self.config.client_secret.as_deref()) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(ApiError::Internal("OAuth is not configured".into())),
        }
    }

    pub fn authorization_url(&self, state: &str) -> Result<String, ApiError> {
        let (client_id, _) = self.credentials()?;
        let mut url = Url::parse(&self.config.auth_url)
            .map_err(|e| ApiError::Internal(format!("invalid auth url: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", ANALYTICS_READONLY_SCOPE)
            .append_pair("access_type", "online")
            .append_pair("prompt", "consent")
            .append_pair("state", state);
        Ok(url.into())
    }

    pub async fn exchange_code(&self, code: &str) -> Result<OAuthTokenResponse, ApiError> {
        let (client_id, client_secret) = self.credentials()?;
        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let resp = self
            .http
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "token exchange request failed");
                ApiError::External(format!("Could not reach Google OAuth: {}", e))
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(%status, body = %body, "token exchange rejected");
            return Err(ApiError::Unauthorized(format!("token exchange failed ({})", status)));
        }

        let token: OAuthTokenResponse = resp.json().await.map_err(|e| {
            error!(error = %e, "invalid token response");
            ApiError::External(format!("Could not parse token response: {}", e))
        })?;
        info!(expires_in = ?token.expires_in, token_type = ?token.token_type, "obtained access token");
        Ok(token)
    }
}
