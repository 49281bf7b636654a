pub mod country_metric;
pub mod dashboard;
pub mod date_range;
