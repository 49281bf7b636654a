use serde_json::{json, Value};

use super::country_metric::CountryMetricRow;

/// Rows shown in the bar chart and the details table.
pub const TOP_ROWS: usize = 8;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to load analytics data. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Unauthenticated,
    Loading,
    Failed { message: String },
    NoData,
    Ready(DashboardData),
}

/// Google Charts input: a header row followed by data rows, plus options.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub rows: Vec<Value>,
    pub options: Value,
}

impl ChartSpec {
    pub fn data_json(&self) -> String {
        script_safe(&Value::Array(self.rows.clone()))
    }

    pub fn options_json(&self) -> String {
        script_safe(&self.options)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub country: String,
    pub active_users: u64,
    pub new_users: u64,
    pub change: String,
    pub negative: bool,
}

impl TableRow {
    pub fn change_class(&self) -> &'static str {
        if self.negative { "change-down" } else { "change-up" }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub geo: ChartSpec,
    pub bar: ChartSpec,
    pub table: Vec<TableRow>,
}

impl DashboardData {
    /// Map gets every row; bar chart and table get the first [`TOP_ROWS`] in incoming order.
    pub fn from_rows(rows: &[CountryMetricRow]) -> Self {
        let top = &rows[..rows.len().min(TOP_ROWS)];

        let mut geo_rows = vec![json!(["Country", "Active Users"])];
        geo_rows.extend(rows.iter().map(|r| json!([r.country, r.active_users])));

        let mut bar_rows = vec![json!(["Country", "Active Users", "New Users"])];
        bar_rows.extend(top.iter().map(|r| json!([r.country, r.active_users, r.new_users])));

        let table = top
            .iter()
            .map(|r| TableRow {
                country: r.country.clone(),
                active_users: r.active_users,
                new_users: r.new_users,
                change: r.change.clone(),
                negative: r.change_is_negative(),
            })
            .collect();

        Self {
            geo: ChartSpec {
                rows: geo_rows,
                options: json!({
                    "colorAxis": { "colors": ["#e0f7fa", "#0066cc"] },
                    "backgroundColor": "#f8f9fa",
                    "datalessRegionColor": "#f0f0f0",
                    "defaultColor": "#f5f5f5"
                }),
            },
            bar: ChartSpec {
                rows: bar_rows,
                options: json!({
                    "title": "Active and New Users by Country",
                    "hAxis": { "title": "Users", "minValue": 0 },
                    "vAxis": { "title": "Country" },
                    "bars": "horizontal",
                    "legend": { "position": "top" },
                    "chartArea": { "width": "80%", "height": "70%" },
                    "colors": ["#1e88e5", "#42a5f5"]
                }),
            },
            table,
        }
    }
}

// JSON dropped into a <script> block must not be able to close it.
fn script_safe(value: &Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
