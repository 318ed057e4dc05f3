//! API endpoint handlers

use crate::crawler::{crawl, CrawlRecord};
use crate::renderer::WebDriverRenderer;
use crate::server::AppState;
use crate::storage::RecordSink;
use crate::PagesiftError;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Request body for `POST /api/scrape`
#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: Option<String>,
}

/// Response body for `POST /api/scrape`
#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub message: String,
    pub data: Option<CrawlRecord>,
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn server_error(message: String) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
}

// ===== POST /api/scrape =====

/// Runs a full crawl for the submitted seed URL and appends the records to
/// the sink; blocks until the crawl completes
pub async fn scrape(
    State(state): State<AppState>,
    Json(req): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let seed = match req.url {
        Some(url) if !url.trim().is_empty() => url,
        _ => return Err(bad_request("URL is required")),
    };

    // Every request gets its own renderer; the WebDriver session pool is not
    // shared across concurrent crawls
    let renderer = WebDriverRenderer::new(&state.config.renderer.webdriver_url);

    let records = crawl(&state.config, &renderer, &seed)
        .await
        .map_err(|e| match e {
            PagesiftError::InvalidSeed { .. } => bad_request(&e.to_string()),
            other => server_error(format!("Failed to scrape: {}", other)),
        })?;

    {
        let mut sink = state.sink.lock().unwrap();
        sink.append(&records)
            .map_err(|e| server_error(format!("Failed to persist records: {}", e)))?;
    }

    Ok(Json(ScrapeResponse {
        message: format!("Scraped {} pages", records.len()),
        data: records.first().cloned(),
    }))
}

// ===== GET /api/scraped-data =====

/// Returns all stored records with links/images parsed back into arrays
pub async fn scraped_data(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let records = {
        let sink = state.sink.lock().unwrap();
        sink.read_all()
            .map_err(|e| server_error(format!("Failed to read records: {}", e)))?
    };

    Ok(Json(json!({ "data": records })))
}

// ===== GET /api/download-csv =====

/// Streams the raw persisted table as a CSV attachment
pub async fn download_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let path = {
        let sink = state.sink.lock().unwrap();
        if !sink.has_data() {
            return Err((
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "No CSV data available" })),
            ));
        }
        sink.path().to_path_buf()
    };

    let content = tokio::fs::read(&path)
        .await
        .map_err(|e| server_error(format!("Failed to read CSV file: {}", e)))?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"scraped_data.csv\"".to_string(),
        ),
    ];

    Ok((headers, content).into_response())
}

// ===== GET /api/health =====

/// Liveness probe with a constant payload
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "OK", "message": "Backend is running" }))
}
