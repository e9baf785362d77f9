use std::{net::SocketAddr, sync::Arc, time::Duration as StdDuration};

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use roster::RosterConfig;
use shared::error::ApiException;
use tokio::task::JoinHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use viewer_api::{expire_idle_sessions, ViewerContext};

mod api;
mod app_state;
mod config;
mod pages;
mod render;

use app_state::AppState;
use config::load_settings;

const MAX_BODY_BYTES: usize = 16 * 1024;
const REAPER_INTERVAL: StdDuration = StdDuration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let viewer = ViewerContext::new(RosterConfig::default()).map_err(ApiException::from)?;
    let state = AppState::new(viewer.clone(), &settings);
    info!(
        title = %state.branding.title,
        logo = %state.branding.logo_src,
        ttl_seconds = settings.session_ttl_seconds,
        "roster viewer configured"
    );
    let _reaper = spawn_session_reaper(viewer, settings.session_ttl_seconds);

    let app = build_router(Arc::new(state));
    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(pages::index))
        .route("/login", post(pages::login))
        .route("/back", post(pages::back))
        .route("/next", post(pages::next))
        .route("/logout", post(pages::logout))
        .route("/logo.png", get(pages::logo))
        .nest("/api", api::routes())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

fn spawn_session_reaper(viewer: ViewerContext, ttl_seconds: i64) -> JoinHandle<()> {
    let ttl = chrono::Duration::seconds(ttl_seconds);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(REAPER_INTERVAL);
        loop {
            ticker.tick().await;
            let expired = expire_idle_sessions(&viewer, ttl).await;
            if expired > 0 {
                debug!(expired, "pruned idle sessions");
            }
        }
    })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
