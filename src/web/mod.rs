//! The web front end: one form page and the endpoint it posts to.

use std::num::NonZeroU16;
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::{error, info};

use crate::config::ProviderConfig;
use crate::constants::MAX_SESSION_IDLE_MINUTES;
use crate::provider::{ImageBackend, OpenAiProvider};

mod csrf;
mod prelude;
mod session;
mod views;

use views::{generate_handler, index_handler};

#[derive(Clone)]
pub(crate) struct AppState {
    backend: Arc<dyn ImageBackend>,
}

impl AppState {
    fn new(backend: Arc<dyn ImageBackend>) -> Self {
        Self { backend }
    }
}

fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", axum::routing::get(index_handler))
        .route("/generate", axum::routing::post(generate_handler))
        .route("/static/styles.css", axum::routing::get(styles_handler))
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

/// Builds the application around an image backend.
///
/// Sessions live in memory and expire after `session_idle_minutes` of
/// inactivity. They only carry form values and the last error text.
pub fn build_app(backend: Arc<dyn ImageBackend>, session_idle_minutes: u32) -> Router {
    build_app_with_store(backend, MemoryStore::default(), session_idle_minutes)
}

fn build_app_with_store(
    backend: Arc<dyn ImageBackend>,
    store: MemoryStore,
    session_idle_minutes: u32,
) -> Router {
    let session_layer = SessionManagerLayer::new(store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(i64::from(
            session_idle_minutes.clamp(1, MAX_SESSION_IDLE_MINUTES),
        ))));

    create_router()
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(backend))
}

/// Starts the server and blocks until it's shut down.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    provider: ProviderConfig,
    session_idle_minutes: u32,
) -> Result<(), anyhow::Error> {
    info!(
        "Using image model {} at {}",
        provider.image_model, provider.api_base
    );
    let backend: Arc<dyn ImageBackend> = Arc::new(OpenAiProvider::new(provider));
    let app = build_app(backend, session_idle_minutes);

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
