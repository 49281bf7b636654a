use serde::{Deserialize, Serialize};

pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// One country's users for the reporting window, as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryMetricRow {
    pub country: String,
    pub active_users: u64,
    pub new_users: u64,
    /// Percentage difference of active over new users, two decimals.
    pub change: String,
}

impl CountryMetricRow {
    pub fn new(country: impl Into<String>, active_users: u64, new_users: u64) -> Self {
        let country = country.into();
        let country = if country.trim().is_empty() { UNKNOWN_COUNTRY.to_string() } else { country };
        Self {
            country,
            active_users,
            new_users,
            change: format_change(percentage_difference(active_users, new_users)),
        }
    }

    pub fn change_is_negative(&self) -> bool {
        self.change.starts_with('-')
    }
}

/// `(current - previous) / previous * 100`, or 0 when `previous` is 0.
pub fn percentage_difference(current: u64, previous: u64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    (current as f64 - previous as f64) / previous as f64 * 100.0
}

/// Two decimals, exact ties rounded away from zero.
pub fn format_change(value: f64) -> String {
    let out = format!("{:.2}", (value * 100.0).round() / 100.0);
    // "-0.00" reads as a drop that never happened
    if out == "-0.00" { "0.00".to_string() } else { out }
}
