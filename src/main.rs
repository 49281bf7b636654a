use anyhow::Context;
use axum::Router;
use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod routes;
mod handlers;
mod services;
mod models;
mod types;
mod utils;


async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut sig) = signal(SignalKind::terminate()) {
            sig.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! { _ = ctrl_c => {}, _ = terminate => {} }
}

// RUST_LOG wins; otherwise our own crate at info and the HTTP stack at warn.
fn init_tracing() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "analytics_dashboard=info,tower_http=warn".into());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();
    init_tracing();

    let cfg = config::AppConfig::from_env()?;
    let state = cfg.build_state()?;
    let app: Router = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = TcpListener::bind(addr).await.with_context(|| format!("binding {addr}"))?;
    info!(
        property = %cfg.property_id,
        auth_mode = ?cfg.auth_mode,
        source = cfg.backend_url.as_deref().unwrap_or("google-analytics"),
        oauth = cfg.oauth.client_id.is_some(),
        "dashboard listening on http://{addr}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
