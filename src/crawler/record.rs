//! Crawl record types
//!
//! One [`CrawlRecord`] is produced per visited URL (except skips) and is
//! immutable once written. Field defaults are explicit: absent text fields are
//! empty strings, absent collections are empty vectors, so consumers never
//! deal with missing columns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a visited page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PageStatus {
    /// Extracted data and at least one link
    Success,
    /// Extracted data but no links
    Partial,
    /// Page content matched an anti-bot/block marker
    Blocked,
    /// Fetch or parse failed; no content extracted
    Error,
}

impl PageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Success => "SUCCESS",
            PageStatus::Partial => "PARTIAL",
            PageStatus::Blocked => "BLOCKED",
            PageStatus::Error => "ERROR",
        }
    }
}

impl std::str::FromStr for PageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUCCESS" => Ok(PageStatus::Success),
            "PARTIAL" => Ok(PageStatus::Partial),
            "BLOCKED" => Ok(PageStatus::Blocked),
            "ERROR" => Ok(PageStatus::Error),
            other => Err(format!("Unknown page status: {}", other)),
        }
    }
}

impl std::fmt::Display for PageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A link as it appeared on a page: visible text plus the raw href attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub text: String,
    pub href: String,
}

/// One persisted row per visited URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlRecord {
    pub url: String,
    pub title: String,
    pub h1: String,
    #[serde(rename = "metaDescription")]
    pub meta_description: String,
    #[serde(rename = "metaTitle")]
    pub meta_title: String,
    pub links: Vec<PageLink>,
    pub images: Vec<String>,
    #[serde(rename = "bodyText")]
    pub body_text: String,
    pub status: PageStatus,
    pub scraped_at: DateTime<Utc>,
}

impl CrawlRecord {
    /// Builds an ERROR-status record for a URL whose fetch failed; all
    /// extracted fields stay at their defaults
    pub fn fetch_error(url: &str) -> Self {
        Self {
            url: url.to_string(),
            title: String::new(),
            h1: String::new(),
            meta_description: String::new(),
            meta_title: String::new(),
            links: Vec::new(),
            images: Vec::new(),
            body_text: String::new(),
            status: PageStatus::Error,
            scraped_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        for status in [
            PageStatus::Success,
            PageStatus::Partial,
            PageStatus::Blocked,
            PageStatus::Error,
        ] {
            assert_eq!(PageStatus::from_str(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(PageStatus::from_str("PENDING").is_err());
    }

    #[test]
    fn test_fetch_error_record_is_empty() {
        let record = CrawlRecord::fetch_error("https://example.com/broken");
        assert_eq!(record.url, "https://example.com/broken");
        assert_eq!(record.status, PageStatus::Error);
        assert!(record.title.is_empty());
        assert!(record.links.is_empty());
        assert!(record.images.is_empty());
    }
}
