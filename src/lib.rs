//! Pagesift: a bounded, same-origin web crawler
//!
//! Given a seed URL, Pagesift renders pages through a headless browser,
//! extracts structured content, follows same-site links (including detected
//! pagination links), and persists one record per visited page, capped at a
//! fixed page budget.

pub mod config;
pub mod crawler;
pub mod renderer;
pub mod server;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Pagesift operations
#[derive(Debug, Error)]
pub enum PagesiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL '{url}': {message}")]
    InvalidSeed { url: String, message: String },

    #[error("Renderer error: {0}")]
    Renderer(#[from] renderer::RenderError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Pagesift operations
pub type Result<T> = std::result::Result<T, PagesiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlRecord, CrawlSession, ExtractedPage, PageStatus};
pub use renderer::Renderer;
pub use storage::{CsvSink, RecordSink};
