use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::config::AppState;
use crate::models::date_range::DateRange;
use crate::utils::auth::AccessToken;
use crate::utils::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub async fn get_data(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
    Query(p): Query<DataParams>,
) -> Result<impl IntoResponse, ApiError> {
    // Validate query params → 400 if invalid
    let range = DateRange::new(p.start_date.as_deref(), p.end_date.as_deref())?;
    let rows = state.reporting.fetch_country_report_for(&token, &range).await?;
    Ok((axum::http::StatusCode::OK, Json(rows)))
}

pub async fn get_realtime(
    State(state): State<AppState>,
    AccessToken(token): AccessToken,
) -> Result<impl IntoResponse, ApiError> {
    let payload = state.reporting.fetch_realtime_report(&token).await?;
    Ok((axum::http::StatusCode::OK, Json(payload)))
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, Json(serde_json::json!({ "ok": true })))
}
