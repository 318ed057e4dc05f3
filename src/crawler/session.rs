//! Crawl session - main crawl orchestration logic
//!
//! A [`CrawlSession`] owns all per-run state (frontier, visited set, record
//! batch) and drives the loop: dequeue a URL, fetch it through the renderer,
//! extract structured content, record the result, and enqueue newly
//! discovered same-origin links. Sessions are plain values owned by the
//! caller; concurrent crawls get independent sessions.

use crate::config::Config;
use crate::crawler::extractor::{extract, Extraction};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::frontier::Frontier;
use crate::crawler::record::{CrawlRecord, PageLink};
use crate::renderer::Renderer;
use crate::url::{host_of, resolve_href, same_host};
use crate::{PagesiftError, Result};
use chrono::Utc;
use std::time::Duration;
use url::Url;

/// One bounded, same-origin crawl run
pub struct CrawlSession<'a, R: Renderer> {
    renderer: &'a R,
    fetcher: Fetcher,
    seed_host: String,
    frontier: Frontier,
    records: Vec<CrawlRecord>,
}

impl<'a, R: Renderer> CrawlSession<'a, R> {
    /// Creates a session for the given seed URL
    ///
    /// Fails with [`PagesiftError::InvalidSeed`] when the seed is unparseable
    /// or has no hostname; no crawl work happens in that case.
    pub fn new(config: &Config, renderer: &'a R, seed_url: &str) -> Result<Self> {
        let seed = Url::parse(seed_url).map_err(|e| PagesiftError::InvalidSeed {
            url: seed_url.to_string(),
            message: e.to_string(),
        })?;

        let seed_host = host_of(seed.as_str()).ok_or_else(|| PagesiftError::InvalidSeed {
            url: seed_url.to_string(),
            message: "URL has no hostname".to_string(),
        })?;

        let fetcher = Fetcher::new(
            config.renderer.user_agents.clone(),
            Duration::from_secs(config.crawler.navigation_timeout_secs),
        );

        Ok(Self {
            renderer,
            fetcher,
            seed_host,
            frontier: Frontier::new(seed, config.crawler.page_budget),
            records: Vec::new(),
        })
    }

    /// Runs the crawl to completion and returns the records in visit order
    ///
    /// The loop ends when the frontier empties or the page budget is hit.
    /// Every per-URL failure is contained here and surfaces as an
    /// ERROR-status record rather than an error return.
    pub async fn run(mut self) -> Vec<CrawlRecord> {
        tracing::info!(
            "Starting crawl of host '{}' (budget: {} pages)",
            self.seed_host,
            self.frontier.budget()
        );

        while !self.frontier.budget_reached() {
            let current = match self.frontier.pop() {
                Some(url) => url,
                None => break,
            };

            // Defensive; the enqueue invariant should already prevent this
            if !self.frontier.mark_visited(&current) {
                continue;
            }

            self.visit(&current).await;

            tracing::debug!(
                "Visited {} ({} done, {} pending)",
                current,
                self.frontier.visited_count(),
                self.frontier.pending_count()
            );
        }

        tracing::info!(
            "Crawl complete: {} pages visited, {} records, {} URLs left unvisited",
            self.frontier.visited_count(),
            self.records.len(),
            self.frontier.pending_count()
        );

        self.records
    }

    /// Fetches and processes a single URL
    async fn visit(&mut self, current: &Url) {
        let html = match self.fetcher.fetch(self.renderer, current.as_str()).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Fetch failed for {}: {}", current, e);
                self.records.push(CrawlRecord::fetch_error(current.as_str()));
                return;
            }
        };

        match extract(&html, current) {
            Extraction::Skip { links } => {
                // No record for skips, but their links still feed the frontier
                self.harvest_links(&links, current);
            }
            Extraction::Page(page) => {
                // Pagination link is considered before the page's own links,
                // keeping traversal order reproducible
                if let Some(next) = &page.next_url {
                    if next != current {
                        self.try_enqueue(next.clone());
                    }
                }

                self.records.push(CrawlRecord {
                    url: current.to_string(),
                    title: page.title,
                    h1: page.h1,
                    meta_description: page.meta_description,
                    meta_title: page.meta_title,
                    links: page.links.clone(),
                    images: page.images,
                    body_text: page.body_text,
                    status: page.status,
                    scraped_at: Utc::now(),
                });

                self.harvest_links(&page.links, current);
            }
        }
    }

    /// Resolves harvested hrefs against the current page and enqueues the
    /// same-origin ones; malformed hrefs are dropped silently
    fn harvest_links(&mut self, links: &[PageLink], base: &Url) {
        for link in links {
            if let Some(resolved) = resolve_href(&link.href, base) {
                self.try_enqueue(resolved);
            }
        }
    }

    /// Enqueues a URL if it shares the seed's hostname and is not already
    /// visited or pending
    fn try_enqueue(&mut self, url: Url) {
        if !same_host(&url, &self.seed_host) {
            tracing::trace!("Dropping off-origin link: {}", url);
            return;
        }

        if self.frontier.enqueue(url.clone()) {
            tracing::trace!("Queued {}", url);
        }
    }
}

/// Runs a complete crawl for a seed URL
///
/// Convenience wrapper that builds a [`CrawlSession`] and drives it to
/// completion.
///
/// # Example
///
/// ```no_run
/// use pagesift::config::Config;
/// use pagesift::crawler::crawl;
/// use pagesift::renderer::WebDriverRenderer;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let renderer = WebDriverRenderer::new(&config.renderer.webdriver_url);
/// let records = crawl(&config, &renderer, "https://example.com/").await?;
/// println!("Collected {} records", records.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl<R: Renderer>(
    config: &Config,
    renderer: &R,
    seed_url: &str,
) -> Result<Vec<CrawlRecord>> {
    let session = CrawlSession::new(config, renderer, seed_url)?;
    Ok(session.run().await)
}
