use chrono::NaiveDate;
use serde::Serialize;

use crate::utils::error::ApiError;

pub const DEFAULT_START: &str = "7daysAgo";
pub const DEFAULT_END: &str = "today";

/// Reporting window in the Analytics Data API's date vocabulary:
/// `YYYY-MM-DD`, `today`, `yesterday` or `NdaysAgo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl Default for DateRange {
    fn default() -> Self {
        Self { start_date: DEFAULT_START.into(), end_date: DEFAULT_END.into() }
    }
}

impl DateRange {
    pub fn new(start: Option<&str>, end: Option<&str>) -> Result<Self, ApiError> {
        let start = start.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_START);
        let end = end.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_END);

        let start_day = parse_date_token(start)
            .ok_or_else(|| ApiError::Validation(format!("startDate '{start}' is not a valid date")))?;
        let end_day = parse_date_token(end)
            .ok_or_else(|| ApiError::Validation(format!("endDate '{end}' is not a valid date")))?;

        if let (DateToken::Calendar(s), DateToken::Calendar(e)) = (start_day, end_day) {
            if s > e {
                return Err(ApiError::Validation("startDate must not be after endDate".into()));
            }
        }

        Ok(Self { start_date: start.to_string(), end_date: end.to_string() })
    }
}

#[derive(Debug, Clone, Copy)]
enum DateToken {
    Calendar(NaiveDate),
    Relative,
}

fn parse_date_token(s: &str) -> Option<DateToken> {
    if matches!(s, "today" | "yesterday") {
        return Some(DateToken::Relative);
    }
    if let Some(n) = s.strip_suffix("daysAgo") {
        return (!n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())).then_some(DateToken::Relative);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(DateToken::Calendar)
}
