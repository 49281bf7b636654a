use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;
use tracing::{info, warn};

use crate::config::AppState;
use crate::services::oauth::OAuthClient;
use crate::services::session::clear_token;
use crate::utils::error::ApiError;

const STATE_COOKIE: &str = "oauth_state";

#[derive(Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub async fn google_login(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let csrf = OAuthClient::new_state();
    let url = state.oauth.authorization_url(&csrf)?;

    let cookie = Cookie::build((STATE_COOKIE, csrf))
        .path("/auth")
        .http_only(true)
        .secure(state.config.cookie_secure())
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(10));

    info!("redirecting to Google consent screen");
    Ok((jar.add(cookie), Redirect::to(&url)))
}

pub async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(p): Query<CallbackParams>,
) -> Result<impl IntoResponse, ApiError> {
    let expected = jar.get(STATE_COOKIE).map(|c| c.value().to_string());
    let jar = jar.remove(Cookie::build(STATE_COOKIE).path("/auth"));

    if let Some(err) = p.error {
        warn!(error = %err, "Google sign-in was not completed");
        let to = format!("/?error={}", urlencode(&err));
        return Ok((jar, Redirect::to(&to)));
    }

    let code = p
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::Validation("missing authorization code".into()))?;

    match (expected.as_deref(), p.state.as_deref()) {
        (Some(want), Some(got)) if want == got => {}
        _ => return Err(ApiError::Unauthorized("OAuth state mismatch".into())),
    }

    let token = state.oauth.exchange_code(&code).await?;
    let to = format!(
        "{}/dashboard?token={}",
        state.config.frontend_url,
        urlencode(&token.access_token)
    );
    info!("sign-in complete, redirecting to dashboard");
    Ok((jar, Redirect::to(&to)))
}

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (clear_token(jar), Redirect::to("/"))
}

fn urlencode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}
