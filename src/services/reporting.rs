use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use crate::config::AppConfig;
use crate::models::country_metric::{CountryMetricRow, UNKNOWN_COUNTRY};
use crate::models::date_range::DateRange;
use crate::services::dashboard::ReportSource;
use crate::types::external::{
    GaDimension, GaMetric, GaRow, RunRealtimeReportRequest, RunReportRequest, RunReportResponse,
};
use crate::utils::error::ApiError;

/// Google Analytics Data API client scoped to one property.
#[derive(Clone)]
pub struct ReportingClient {
    http: Client,
    config: Arc<AppConfig>,
}

impl ReportingClient {
    pub fn new(http: Client, config: Arc<AppConfig>) -> Self {
        Self { http, config }
    }

    /// Active and new users per country over the trailing seven days.
    pub async fn fetch_country_report(&self, access_token: &str) -> Result<Vec<CountryMetricRow>, ApiError> {
        self.fetch_country_report_for(access_token, &DateRange::default()).await
    }

    pub async fn fetch_country_report_for(
        &self,
        access_token: &str,
        range: &DateRange,
    ) -> Result<Vec<CountryMetricRow>, ApiError> {
        let body = RunReportRequest {
            dimensions: vec![GaDimension { name: "country" }],
            metrics: vec![GaMetric { name: "activeUsers" }, GaMetric { name: "newUsers" }],
            date_ranges: vec![range],
        };

        let report: RunReportResponse = self
            .post("runReport", access_token, &body)
            .await?
            .json()
            .await
            .map_err(|e| {
                error!(error = %e, "could not parse analytics report");
                ApiError::External(format!("Could not parse analytics report: {}", e))
            })?;

        let rows: Vec<CountryMetricRow> = report.rows.iter().map(map_row).collect();
        debug!(rows = rows.len(), start = %range.start_date, end = %range.end_date, "country report fetched");
        Ok(rows)
    }

    /// Current active users by country, passed through as Google returns it.
    pub async fn fetch_realtime_report(&self, access_token: &str) -> Result<serde_json::Value, ApiError> {
        let body = RunRealtimeReportRequest {
            dimensions: vec![GaDimension { name: "country" }],
            metrics: vec![GaMetric { name: "activeUsers" }],
        };

        self.post("runRealtimeReport", access_token, &body)
            .await?
            .json()
            .await
            .map_err(|e| {
                error!(error = %e, "could not parse realtime report");
                ApiError::External(format!("Could not parse realtime report: {}", e))
            })
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        method: &str,
        access_token: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let url = format!(
            "{}/properties/{}:{}",
            self.config.analytics_api_base, self.config.property_id, method
        );

        let resp = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(method, error = %e, "analytics request failed");
                ApiError::External(format!("Could not reach Google Analytics: {}", e))
            })?;

        check_status(method, resp).await
    }
}

async fn check_status(method: &str, resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    error!(method, %status, body = %body, "analytics API rejected request");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized(format!(
            "Google Analytics rejected the access token ({})",
            status
        ))),
        _ => Err(ApiError::External(format!("Google Analytics error ({}): {}", status, body))),
    }
}

fn map_row(row: &GaRow) -> CountryMetricRow {
    let country = row
        .dimension_values
        .first()
        .and_then(|v| v.value.as_deref())
        .unwrap_or(UNKNOWN_COUNTRY);
    CountryMetricRow::new(country, metric(row, 0), metric(row, 1))
}

fn metric(row: &GaRow, idx: usize) -> u64 {
    row.metric_values
        .get(idx)
        .and_then(|v| v.value.as_deref())
        .map(leading_count)
        .unwrap_or(0)
}

// Whole-number prefix, so "10.0" reads as 10. Signs and non-digits give 0.
fn leading_count(raw: &str) -> u64 {
    let s = raw.trim_start();
    let digits = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..digits].parse().unwrap_or(0)
}

#[async_trait]
impl ReportSource for ReportingClient {
    async fn country_report(&self, access_token: &str) -> Result<Vec<CountryMetricRow>, ApiError> {
        self.fetch_country_report(access_token).await
    }
}
