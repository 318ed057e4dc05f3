//! Crawler module - the crawl/extraction engine
//!
//! Contains the frontier, the page fetcher, the structured extractor, and the
//! session that orchestrates them into a bounded same-origin crawl.

pub mod extractor;
pub mod fetcher;
pub mod frontier;
pub mod record;
pub mod session;

pub use extractor::{extract, Extraction, ExtractedPage};
pub use fetcher::{FetchError, Fetcher};
pub use frontier::Frontier;
pub use record::{CrawlRecord, PageLink, PageStatus};
pub use session::{crawl, CrawlSession};
