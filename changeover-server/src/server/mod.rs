//! HTTP surface of the changeover matrix

mod error;
mod handlers;
mod logging;
mod models;

use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post, put};
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::matrix::MatrixStore;

/// State shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: MatrixStore,
    pub export_path: PathBuf,
}

impl AppState {
    pub fn new(store: MatrixStore, export_path: PathBuf) -> Self {
        Self { store, export_path }
    }
}

/// Build the router with all routes and middleware
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/matrix-data", get(handlers::get_matrix_data))
        .route("/download", get(handlers::download_excel))
        .route("/upload", post(handlers::upload_excel))
        .route("/add-part", post(handlers::add_part))
        .route("/delete-part", delete(handlers::delete_part))
        .route("/update-time", put(handlers::update_time))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(logging::log_requests))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &ServerConfig, store: MatrixStore) -> Result<()> {
    let state = AppState::new(store, config.export_path.clone());
    let app = router(state, config.max_upload_bytes);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
