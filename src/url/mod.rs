//! URL utilities for same-origin crawling
//!
//! This module handles hostname extraction, relative href resolution, and the
//! same-origin test used by the crawl loop. "Same-origin" here means an
//! identical hostname; scheme and port are deliberately not considered.

use url::Url;

/// Extracts the hostname from a URL string
///
/// # Arguments
///
/// * `url` - The URL to extract the hostname from
///
/// # Returns
///
/// * `Some(String)` - The hostname (e.g., "example.com")
/// * `None` - The URL is unparseable or has no host
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

/// Resolves an href (possibly relative) against a base URL
///
/// Returns `None` for hrefs that should never be enqueued:
/// - empty hrefs
/// - `javascript:`, `mailto:`, `tel:`, `data:` schemes
/// - fragment-only links (same-page anchors)
/// - hrefs that fail to resolve
/// - non-HTTP(S) URLs after resolution
pub fn resolve_href(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(resolved) => {
            if resolved.scheme() == "http" || resolved.scheme() == "https" {
                Some(resolved)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Tests whether a URL shares a hostname with the crawl seed
pub fn same_host(url: &Url, seed_host: &str) -> bool {
    url.host_str().map(|h| h == seed_host).unwrap_or(false)
}
