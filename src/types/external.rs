use serde::{Deserialize, Serialize};

use crate::models::date_range::DateRange;

#[derive(Serialize)]
pub struct GaDimension { pub name: &'static str }

#[derive(Serialize)]
pub struct GaMetric { pub name: &'static str }

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest<'a> {
    pub dimensions: Vec<GaDimension>,
    pub metrics: Vec<GaMetric>,
    pub date_ranges: Vec<&'a DateRange>,
}

#[derive(Serialize)]
pub struct RunRealtimeReportRequest {
    pub dimensions: Vec<GaDimension>,
    pub metrics: Vec<GaMetric>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    #[serde(default)] pub rows: Vec<GaRow>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GaRow {
    #[serde(default)] pub dimension_values: Vec<GaValue>,
    #[serde(default)] pub metric_values: Vec<GaValue>,
}

#[derive(Deserialize, Default)]
pub struct GaValue { pub value: Option<String> }

#[derive(Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
}
