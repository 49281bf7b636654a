use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;

use crate::config::{AppState, AuthMode};
use crate::services::session::token_from_jar;
use crate::utils::error::ApiError;

/// The caller's Google access token, taken from wherever `AUTH_MODE` says.
pub struct AccessToken(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AccessToken {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = match state.config.auth_mode {
            AuthMode::Header => bearer_token(&parts.headers),
            AuthMode::Cookie => token_from_jar(&CookieJar::from_headers(&parts.headers)),
        };
        token.map(AccessToken).ok_or_else(|| {
            ApiError::Unauthorized(match state.config.auth_mode {
                AuthMode::Header => "missing bearer token".into(),
                AuthMode::Cookie => "missing session cookie".into(),
            })
        })
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}
