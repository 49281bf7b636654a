use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::config::AppState;
use crate::models::dashboard::DashboardView;
use crate::services::dashboard::Dashboard;
use crate::services::session::{resolve_token, CookieTokenStore};
use crate::utils::error::ApiError;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    view: DashboardView,
}

#[derive(Deserialize)]
pub struct LoginParams {
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct DashboardParams {
    pub token: Option<String>,
}

pub async fn login_page(Query(p): Query<LoginParams>) -> Result<impl IntoResponse, ApiError> {
    render(&LoginTemplate { error: p.error })
}

pub async fn dashboard_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(p): Query<DashboardParams>,
) -> Result<impl IntoResponse, ApiError> {
    let mut store = CookieTokenStore::new(jar, state.config.cookie_secure());
    let resolution = resolve_token(p.token.as_deref(), &mut store);

    let mut dashboard = Dashboard::new();
    if let Some(token) = resolution.token() {
        dashboard.load(token, state.dashboard_source.as_ref()).await;
    }

    let page = render(&DashboardTemplate { view: dashboard.view() })?;
    Ok((store.into_jar(), page))
}

fn render<T: Template>(t: &T) -> Result<Html<String>, ApiError> {
    t.render()
        .map(Html)
        .map_err(|e| ApiError::Internal(format!("template render failed: {}", e)))
}
