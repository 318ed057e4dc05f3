use crate::config::types::{Config, CrawlerConfig, RendererConfig, ServerConfig, StorageConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_renderer_config(&config.renderer)?;
    validate_storage_config(&config.storage)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    if config.page_budget < 1 {
        return Err(ConfigError::Validation(format!(
            "page_budget must be >= 1, got {}",
            config.page_budget
        )));
    }

    if config.navigation_timeout_secs < 1 || config.navigation_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "navigation_timeout_secs must be between 1 and 300, got {}",
            config.navigation_timeout_secs
        )));
    }

    Ok(())
}

/// Validates renderer configuration
fn validate_renderer_config(config: &RendererConfig) -> ConfigResult<()> {
    let url = Url::parse(&config.webdriver_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid webdriver_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "webdriver_url must use http or https, got '{}'",
            config.webdriver_url
        )));
    }

    // The identity pool needs at least 3 entries for rotation to matter
    if config.user_agents.len() < 3 {
        return Err(ConfigError::Validation(format!(
            "user_agents pool must contain at least 3 entries, got {}",
            config.user_agents.len()
        )));
    }

    if config.user_agents.iter().any(|ua| ua.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "user_agents entries cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> ConfigResult<()> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> ConfigResult<()> {
    config
        .bind_addr
        .parse::<std::net::SocketAddr>()
        .map_err(|e| {
            ConfigError::Validation(format!("Invalid bind_addr '{}': {}", config.bind_addr, e))
        })?;

    Ok(())
}
