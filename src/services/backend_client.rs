use async_trait::async_trait;
use axum_extra::extract::cookie::Cookie;
use reqwest::{header, Client, StatusCode};
use tracing::error;

use crate::config::AuthMode;
use crate::models::country_metric::CountryMetricRow;
use crate::models::date_range::DateRange;
use crate::services::dashboard::ReportSource;
use crate::services::session::TOKEN_COOKIE;
use crate::utils::error::ApiError;

/// Reads the country report from another deployment's `/api/analytics/data`.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    auth_mode: AuthMode,
}

impl BackendClient {
    pub fn new(http: Client, base_url: String, auth_mode: AuthMode) -> Self {
        Self { http, base_url, auth_mode }
    }
}

#[async_trait]
impl ReportSource for BackendClient {
    async fn country_report(&self, access_token: &str) -> Result<Vec<CountryMetricRow>, ApiError> {
        let range = DateRange::default();
        let req = self
            .http
            .get(format!("{}/api/analytics/data", self.base_url))
            .query(&[("startDate", &range.start_date), ("endDate", &range.end_date)]);

        let req = match self.auth_mode {
            AuthMode::Header => req.bearer_auth(access_token),
            AuthMode::Cookie => req.header(header::COOKIE, Cookie::new(TOKEN_COOKIE, access_token).to_string()),
        };

        let resp = req.send().await.map_err(|e| {
            error!(error = %e, "backend request failed");
            ApiError::External(format!("Could not reach analytics backend: {}", e))
        })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized("analytics backend rejected the token".into()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(%status, body = %body, "analytics backend returned an error");
            return Err(ApiError::External(format!("analytics backend error ({})", status)));
        }

        resp.json().await.map_err(|e| {
            error!(error = %e, "could not parse backend rows");
            ApiError::External(format!("Could not parse backend response: {}", e))
        })
    }
}
