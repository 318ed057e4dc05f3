//! Rendering abstraction for the crawler
//!
//! The crawl engine never talks to a browser directly; it goes through the
//! narrow [`Renderer`] trait (open a page, apply an identity header, navigate
//! and wait, hand back the fully rendered HTML, close the page). Production
//! uses [`WebDriverRenderer`]; tests substitute a fake returning canned HTML.

mod webdriver;

pub use webdriver::WebDriverRenderer;

use async_trait::async_trait;
use thiserror::Error;

/// Errors produced while rendering a page
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to open rendering session at {endpoint}: {message}")]
    Session { endpoint: String, message: String },

    #[error("Navigation failed for {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("Failed to read rendered content for {url}: {message}")]
    Content { url: String, message: String },
}

/// A browser-like capability that can produce fully rendered HTML for a URL
///
/// Implementations must scope any per-call resources (pages, tabs, sessions)
/// to the call itself and release them on every exit path.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Renders the page at `url`, presenting `user_agent` as the client
    /// identity, and returns the final HTML
    async fn render(&self, url: &str, user_agent: &str) -> Result<String, RenderError>;
}
