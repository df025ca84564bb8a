//! HTTP surface of the analyzer.
//!
//! Routes:
//! - `POST /analyzer/analyze`            capture uploaded files into the result store
//! - `POST /analyzer/ai-analyze`         AI analysis of one file (inline or cached)
//! - `POST /analyzer/ai-analyze-batch`   AI analysis of several files
//! - `POST /analyzer/ai-analyze-package` whole-project overview from file names
//! - `GET  /analyzer/models`             allow-listed models
//! - `GET  /health`                      liveness

use std::{env, sync::Arc};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;
use tracing::{info, warn};

pub use crate::core::app_state::AppState;
pub use crate::error_handler::{AppError, AppResult};

use crate::{
    middleware_layer::json_extractor::json_error_mapper,
    routes::{
        analyzer::{
            ai_analyze_batch_route::ai_analyze_batch_route,
            ai_analyze_package_route::ai_analyze_package_route,
            ai_analyze_route::ai_analyze_route, analyze_route::analyze_route,
            models_route::models_route,
        },
        health_route::health_route,
    },
};

/// Listen address used when `API_ADDRESS` is not set.
pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8000";

/// Builds the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/analyzer/analyze", post(analyze_route))
        .route("/analyzer/ai-analyze", post(ai_analyze_route))
        .route("/analyzer/ai-analyze-batch", post(ai_analyze_batch_route))
        .route("/analyzer/ai-analyze-package", post(ai_analyze_package_route))
        .route("/analyzer/models", get(models_route))
        .route("/health", get(health_route))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Loads state from the environment and serves until Ctrl+C.
///
/// # Errors
/// Fails on configuration errors (missing credentials, unsupported model),
/// when the listener cannot be bound, or when the server stops abnormally.
pub async fn start() -> AppResult<()> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_API_ADDRESS.to_string());

    let state = Arc::new(AppState::from_env()?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(|source| AppError::Bind {
            addr: host_url.clone(),
            source,
        })?;

    info!(address = %host_url, "analyzer api listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("analyzer api stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        // Without a signal handler keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
}
