//! HTTP API server
//!
//! Thin plumbing around the crawl engine: a scrape trigger, results read-back,
//! CSV download, and a liveness probe. Each scrape request owns its own
//! renderer instance; only the record sink is shared between requests.

pub mod handlers;

use crate::config::Config;
use crate::storage::CsvSink;
use axum::routing::{get, post};
use axum::Router;
use std::sync::{Arc, Mutex};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sink: Arc<Mutex<CsvSink>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sink = CsvSink::new(&config.storage.csv_path);
        Self {
            config: Arc::new(config),
            sink: Arc::new(Mutex::new(sink)),
        }
    }
}

/// Builds the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/scrape", post(handlers::scrape))
        .route("/api/scraped-data", get(handlers::scraped_data))
        .route("/api/download-csv", get(handlers::download_csv))
        .route("/api/health", get(handlers::health))
        .with_state(state)
}

/// Runs the API server until the process is stopped
pub async fn run_server(config: Config) -> crate::Result<()> {
    let bind_addr = config.server.bind_addr.clone();
    let state = AppState::new(config);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("API server listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
