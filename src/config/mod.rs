//! Configuration module for Pagesift
//!
//! Handles loading, parsing, and validation of TOML configuration files.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlerConfig, RendererConfig, ServerConfig, StorageConfig};
pub use validation::validate;
