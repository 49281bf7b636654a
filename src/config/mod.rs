use anyhow::{anyhow, bail};
use reqwest::Client;
use std::{env, str::FromStr, sync::Arc, time::Duration};
use tracing::info;
use url::Url;

use crate::services::backend_client::BackendClient;
use crate::services::dashboard::ReportSource;
use crate::services::oauth::OAuthClient;
use crate::services::reporting::ReportingClient;

pub const DEFAULT_ANALYTICS_API_BASE: &str = "https://analyticsdata.googleapis.com/v1beta";
pub const DEFAULT_GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub reporting: ReportingClient,
    pub oauth: OAuthClient,
    /// Where the dashboard page reads its rows from.
    pub dashboard_source: Arc<dyn ReportSource>,
}

/// Where `/api/*` looks for the caller's access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// `Authorization: Bearer <token>`
    Header,
    /// The `accessToken` cookie set by the dashboard.
    Cookie,
}

impl FromStr for AuthMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "header" | "bearer" => Ok(Self::Header),
            "cookie" | "session" => Ok(Self::Cookie),
            other => Err(anyhow!("AUTH_MODE must be 'header' or 'cookie', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub property_id: String,
    pub analytics_api_base: String,
    pub oauth: OAuthConfig,
    pub frontend_url: String,
    pub backend_url: Option<String>,
    pub auth_mode: AuthMode,
    pub external_timeout_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let port: u16 = env::var("PORT").unwrap_or_else(|_| "5000".into()).parse()?;

        let property_id = optional("GOOGLE_ANALYTICS_PROPERTY_ID")
            .ok_or_else(|| anyhow!("GOOGLE_ANALYTICS_PROPERTY_ID is required"))?;

        let external_timeout_ms: u64 = env::var("EXTERNAL_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(12_000);

        let auth_mode = match optional("AUTH_MODE") {
            Some(mode) => mode.parse()?,
            None => AuthMode::Header,
        };

        let local = format!("http://localhost:{port}");
        let oauth = OAuthConfig {
            client_id: optional("GOOGLE_CLIENT_ID"),
            client_secret: optional("GOOGLE_CLIENT_SECRET"),
            redirect_uri: optional("GOOGLE_REDIRECT_URI")
                .unwrap_or_else(|| format!("{local}/auth/google/callback")),
            auth_url: optional("GOOGLE_AUTH_URL").unwrap_or_else(|| DEFAULT_GOOGLE_AUTH_URL.into()),
            token_url: optional("GOOGLE_TOKEN_URL").unwrap_or_else(|| DEFAULT_GOOGLE_TOKEN_URL.into()),
        };

        Self {
            port,
            property_id,
            analytics_api_base: optional("ANALYTICS_API_BASE")
                .unwrap_or_else(|| DEFAULT_ANALYTICS_API_BASE.into()),
            oauth,
            frontend_url: optional("FRONTEND_URL").unwrap_or(local),
            backend_url: optional("BACKEND_URL"),
            auth_mode,
            external_timeout_ms,
        }
        .normalized()
    }

    /// Trims trailing slashes, strips a `properties/` prefix and checks the URLs parse.
    pub fn normalized(mut self) -> Result<Self, anyhow::Error> {
        self.property_id = self
            .property_id
            .trim()
            .trim_start_matches("properties/")
            .to_string();
        if self.property_id.is_empty() {
            bail!("GOOGLE_ANALYTICS_PROPERTY_ID is required");
        }
        self.analytics_api_base = self.analytics_api_base.trim_end_matches('/').to_string();
        self.frontend_url = self.frontend_url.trim_end_matches('/').to_string();
        self.backend_url = self.backend_url.map(|u| u.trim_end_matches('/').to_string());

        Url::parse(&self.frontend_url).map_err(|e| anyhow!("FRONTEND_URL is invalid: {e}"))?;
        if let Some(b) = &self.backend_url {
            Url::parse(b).map_err(|e| anyhow!("BACKEND_URL is invalid: {e}"))?;
        }
        Ok(self)
    }

    /// Origin allowed by CORS, e.g. `https://dash.example.com`.
    pub fn frontend_origin(&self) -> Option<String> {
        Url::parse(&self.frontend_url)
            .ok()
            .map(|u| u.origin().ascii_serialization())
            .filter(|o| o != "null")
    }

    pub fn cookie_secure(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }

    pub fn build_state(&self) -> Result<AppState, anyhow::Error> {
        // http client
        let http = Client::builder()
            .timeout(Duration::from_millis(self.external_timeout_ms))
            .build()?;

        let config = Arc::new(self.clone());
        let reporting = ReportingClient::new(http.clone(), config.clone());
        let oauth = OAuthClient::new(http.clone(), config.oauth.clone());

        let dashboard_source: Arc<dyn ReportSource> = match &self.backend_url {
            Some(base) => {
                info!(backend = %base, "dashboard reads from remote backend");
                Arc::new(BackendClient::new(http, base.clone(), self.auth_mode))
            }
            None => Arc::new(reporting.clone()),
        };

        Ok(AppState { config, reporting, oauth, dashboard_source })
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
