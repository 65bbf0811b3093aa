//! HTTP server implementation using Axum.

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use duewatch_core::config::GatewayConfig;
use duewatch_core::error::{DuewatchError, Result};
use duewatch_pipeline::NotificationPipeline;

/// Shared state for the gateway.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<NotificationPipeline>,
    /// Deadline applied to each on-demand run.
    pub run_deadline: Duration,
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(super::routes::run_report))
        .route("/status", get(super::routes::status))
        .fallback(super::routes::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind and serve until the process exits.
pub async fn serve(config: &GatewayConfig, state: AppState) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| DuewatchError::Gateway(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("🌐 Gateway listening on http://{addr}");

    axum::serve(listener, build_router(state))
        .await
        .map_err(|e| DuewatchError::Gateway(format!("Server error: {e}")))
}
