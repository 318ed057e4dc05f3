//! WebDriver-backed renderer
//!
//! Drives a headless browser through a WebDriver endpoint (chromedriver,
//! geckodriver, or a Selenium grid). Each render call opens its own session,
//! so the requested user-agent is applied per call and a hung page never
//! leaks into the next fetch.

use crate::renderer::{RenderError, Renderer};
use async_trait::async_trait;
use fantoccini::ClientBuilder;

/// Renderer that delegates to a WebDriver-compatible browser
#[derive(Debug, Clone)]
pub struct WebDriverRenderer {
    webdriver_url: String,
}

impl WebDriverRenderer {
    /// Creates a renderer targeting the given WebDriver endpoint
    pub fn new(webdriver_url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
        }
    }

    /// Builds session capabilities requesting headless mode and the given
    /// user-agent string
    fn capabilities(user_agent: &str) -> serde_json::Map<String, serde_json::Value> {
        let caps = serde_json::json!({
            "goog:chromeOptions": {
                "args": [
                    "--headless=new",
                    "--no-sandbox",
                    "--disable-dev-shm-usage",
                    format!("--user-agent={}", user_agent),
                ]
            },
            "moz:firefoxOptions": {
                "args": ["-headless"],
                "prefs": { "general.useragent.override": user_agent }
            }
        });

        caps.as_object().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Renderer for WebDriverRenderer {
    async fn render(&self, url: &str, user_agent: &str) -> Result<String, RenderError> {
        let client = ClientBuilder::native()
            .capabilities(Self::capabilities(user_agent))
            .connect(&self.webdriver_url)
            .await
            .map_err(|e| RenderError::Session {
                endpoint: self.webdriver_url.clone(),
                message: e.to_string(),
            })?;

        // Navigate, then read the final DOM. The session is closed on every
        // path below before the result is returned.
        let outcome = match client.goto(url).await {
            Ok(()) => client.source().await.map_err(|e| RenderError::Content {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(e) => Err(RenderError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            }),
        };

        if let Err(e) = client.close().await {
            tracing::warn!("Failed to close rendering session for {}: {}", url, e);
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_carry_user_agent() {
        let caps = WebDriverRenderer::capabilities("TestAgent/1.0");
        let chrome = caps.get("goog:chromeOptions").unwrap();
        let args = chrome.get("args").unwrap().as_array().unwrap();

        assert!(args
            .iter()
            .any(|a| a.as_str() == Some("--user-agent=TestAgent/1.0")));
    }

    #[test]
    fn test_renderer_keeps_endpoint() {
        let renderer = WebDriverRenderer::new("http://localhost:9515");
        assert_eq!(renderer.webdriver_url, "http://localhost:9515");
    }
}
