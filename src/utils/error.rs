use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation: {0}")]
    Validation(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("external_unavailable: {0}")]
    External(String),
    #[error("internal: {0}")]
    Internal(String),
}

/// JSON error body. `login` points clients at the sign-in route when the
/// Google token is missing or rejected.
#[derive(Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")] pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")] pub login: Option<&'a str>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::External(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn summary(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Invalid report request",
            ApiError::Unauthorized(_) => "Google sign-in required",
            ApiError::External(_) => "Google Analytics unavailable",
            ApiError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.summary();
        let login = matches!(self, ApiError::Unauthorized(_)).then_some("/auth/google");
        let details = match self {
            ApiError::Validation(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::External(msg)
            | ApiError::Internal(msg) => msg,
        };
        (status, Json(ErrorBody { error, details: Some(details), login })).into_response()
    }
}
