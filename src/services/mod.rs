pub mod backend_client;
pub mod dashboard;
pub mod oauth;
pub mod reporting;
pub mod session;
