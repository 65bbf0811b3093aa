//! Route handlers for the gateway.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;

use super::server::AppState;

/// `GET /`: run the pipeline now and return the full report. The body
/// always describes every record's outcome, or the store-level error.
pub async fn run_report(State(state): State<Arc<AppState>>) -> (StatusCode, String) {
    match state.pipeline.run_with_deadline(state.run_deadline).await {
        Ok(report) => (StatusCode::OK, report.to_string()),
        Err(e) => {
            tracing::error!("On-demand run failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Run failed: {e}"))
        }
    }
}

/// `GET /status`: liveness text, no pipeline invocation.
pub async fn status() -> (StatusCode, String) {
    (
        StatusCode::OK,
        "Worker alive and ready to check due dates.".to_string(),
    )
}

/// Any other path.
pub async fn not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Route not found.".to_string())
}
