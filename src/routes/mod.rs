use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{warn, Span};

use crate::config::AppState;
use crate::handlers::analytics::{get_data, get_realtime, health};
use crate::handlers::auth::{google_callback, google_login, logout};
use crate::handlers::pages::{dashboard_page, login_page};

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state);
    Router::new()
        .route("/", get(login_page))
        .route("/dashboard", get(dashboard_page))
        .route("/api/analytics/data", get(get_data))
        .route("/api/analytics/realtime", get(get_realtime))
        .route("/auth/google", get(google_login))
        .route("/auth/google/callback", get(google_callback))
        .route("/auth/logout", get(logout))
        .route("/healthz", get(health))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
}

// Path only: `/dashboard?token=` and the OAuth callback carry credentials in the query.
fn request_span(request: &Request<Body>) -> Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        version = ?request.version(),
    )
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    match state.config.frontend_origin().map(|o| HeaderValue::from_str(&o)) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        _ => {
            warn!(frontend = %state.config.frontend_url, "no usable frontend origin, CORS disabled");
            CorsLayer::new()
        }
    }
}
