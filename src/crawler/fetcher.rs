//! Page fetcher
//!
//! Wraps a [`Renderer`] with the per-fetch policy: pick a client identity at
//! random from the configured pool, render with a hard timeout, and classify
//! failures. Fetch failures never escape the single-URL boundary; the crawl
//! loop downgrades them to ERROR records.

use crate::renderer::{RenderError, Renderer};
use rand::seq::SliceRandom;
use std::time::Duration;
use thiserror::Error;

/// Errors produced while fetching a single URL
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Timed out fetching {url} after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("Render failed for {url}: {source}")]
    Render {
        url: String,
        #[source]
        source: RenderError,
    },
}

/// Fetches rendered HTML for one URL at a time
#[derive(Debug, Clone)]
pub struct Fetcher {
    user_agents: Vec<String>,
    timeout: Duration,
}

impl Fetcher {
    /// Creates a fetcher with the given identity pool and per-URL timeout
    pub fn new(user_agents: Vec<String>, timeout: Duration) -> Self {
        Self {
            user_agents,
            timeout,
        }
    }

    /// Picks a user-agent uniformly at random from the pool
    fn pick_user_agent(&self) -> &str {
        self.user_agents
            .choose(&mut rand::thread_rng())
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Fetches the fully rendered HTML for `url`
    ///
    /// The renderer call is bounded by the configured timeout; exceeding it
    /// yields [`FetchError::Timeout`] and the renderer's own failures are
    /// wrapped in [`FetchError::Render`].
    pub async fn fetch<R: Renderer>(&self, renderer: &R, url: &str) -> Result<String, FetchError> {
        let user_agent = self.pick_user_agent();
        tracing::debug!("Fetching {} as '{}'", url, user_agent);

        match tokio::time::timeout(self.timeout, renderer.render(url, user_agent)).await {
            Ok(Ok(html)) => {
                tracing::debug!("Rendered {} ({} bytes)", url, html.len());
                Ok(html)
            }
            Ok(Err(source)) => Err(FetchError::Render {
                url: url.to_string(),
                source,
            }),
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
                seconds: self.timeout.as_secs(),
            }),
        }
    }
}
