//! Structured extraction from rendered HTML
//!
//! Given the final HTML of a page and its source URL, this module produces an
//! [`ExtractedPage`]: title and meta fields, capped collections of headings,
//! paragraphs, list items, links, and images, a truncated body text, a status
//! classification, and a detected pagination link.
//!
//! Pages with nothing worth recording (no data, tiny markup) are reported as
//! a skip instead, but their links are still returned so the crawl loop can
//! keep discovering URLs.

use crate::crawler::record::{PageLink, PageStatus};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Per-page collection caps
const MAX_HEADINGS: usize = 10;
const MAX_PARAGRAPHS: usize = 5;
const MAX_LIST_ITEMS: usize = 5;
const MAX_LINKS: usize = 5;
const MAX_IMAGES: usize = 5;

/// Body text is whitespace-collapsed and cut at this many characters
const BODY_TEXT_LIMIT: usize = 1000;

/// Pages shorter than this with no extractable data are skipped
const SKIP_HTML_THRESHOLD: usize = 2000;

/// Substrings (checked against lowercased HTML) that mark a blocked page
const BLOCKED_MARKERS: &[&str] = &["incapsula", "cloudflare", "blocked", "access denied"];

/// Structured content extracted from one rendered page
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    pub title: String,
    pub meta_description: String,
    pub meta_title: String,
    pub h1: String,
    pub headings: Vec<String>,
    pub paragraphs: Vec<String>,
    pub list_items: Vec<String>,
    pub body_text: String,
    pub links: Vec<PageLink>,
    pub images: Vec<String>,
    /// First link matching the pagination heuristics, resolved to absolute form
    pub next_url: Option<Url>,
    pub status: PageStatus,
}

/// Outcome of extracting one page
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// A full page worth recording
    Page(Box<ExtractedPage>),

    /// Nothing worth recording, but links are still harvested for discovery
    Skip { links: Vec<PageLink> },
}

/// Extracts structured content from rendered HTML
///
/// `source_url` is only used to resolve the detected pagination link; ordinary
/// link hrefs are returned raw and resolved later by the crawl loop.
pub fn extract(html: &str, source_url: &Url) -> Extraction {
    let document = Html::parse_document(html);

    let title = first_text(&document, "title");
    let meta_description = first_of(&[
        meta_content(&document, r#"meta[name="description"]"#),
        meta_content(&document, r#"meta[property="og:description"]"#),
    ]);
    let meta_title = meta_content(&document, r#"meta[property="og:title"]"#).unwrap_or_default();
    let h1 = first_text(&document, "h1");

    let headings = collect_texts(&document, "h1, h2, h3, h4, h5, h6", MAX_HEADINGS);
    let paragraphs = collect_texts(&document, "p", MAX_PARAGRAPHS);
    let list_items = collect_texts(&document, "ul li", MAX_LIST_ITEMS);
    let body_text = body_text(&document);
    let links = collect_links(&document);
    let images = collect_images(&document);

    let blocked = is_blocked(html);
    let has_data = !title.is_empty()
        || !headings.is_empty()
        || !body_text.is_empty()
        || !meta_description.is_empty()
        || !meta_title.is_empty();

    // Blocked overrides everything else
    let status = if blocked {
        PageStatus::Blocked
    } else if links.is_empty() && has_data {
        PageStatus::Partial
    } else {
        PageStatus::Success
    };

    if !has_data && html.len() < SKIP_HTML_THRESHOLD && status != PageStatus::Blocked {
        tracing::debug!("Skipping empty page {} but harvesting links", source_url);
        return Extraction::Skip { links };
    }

    let next_url = detect_next_url(&document, source_url);

    Extraction::Page(Box::new(ExtractedPage {
        title,
        meta_description,
        meta_title,
        h1,
        headings,
        paragraphs,
        list_items,
        body_text,
        links,
        images,
        next_url,
        status,
    }))
}

/// Checks the (lowercased) HTML for anti-bot/block markers
fn is_blocked(html: &str) -> bool {
    let lowered = html.to_lowercase();
    BLOCKED_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Trimmed text content of the first element matching the selector
fn first_text(document: &Html, selector: &str) -> String {
    let Ok(sel) = Selector::parse(selector) else {
        return String::new();
    };

    document
        .select(&sel)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Content attribute of the first matching meta element
fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;

    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}

/// First non-empty candidate, or an empty string
fn first_of(candidates: &[Option<String>]) -> String {
    candidates
        .iter()
        .flatten()
        .next()
        .cloned()
        .unwrap_or_default()
}

/// Trimmed texts of matching elements in document order, up to `cap`
fn collect_texts(document: &Html, selector: &str, cap: usize) -> Vec<String> {
    let Ok(sel) = Selector::parse(selector) else {
        return Vec::new();
    };

    document
        .select(&sel)
        .map(element_text)
        .take(cap)
        .collect()
}

/// Whitespace-collapsed body text, truncated to the character limit
fn body_text(document: &Html) -> String {
    let Ok(sel) = Selector::parse("body") else {
        return String::new();
    };

    let Some(body) = document.select(&sel).next() else {
        return String::new();
    };

    let collapsed = body
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    collapsed.chars().take(BODY_TEXT_LIMIT).collect()
}

/// Links in document order with visible text and the raw href attribute
fn collect_links(document: &Html) -> Vec<PageLink> {
    let Ok(sel) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&sel)
        .filter_map(|el| {
            el.value().attr("href").map(|href| PageLink {
                text: element_text(el),
                href: href.to_string(),
            })
        })
        .take(MAX_LINKS)
        .collect()
}

/// Image source attributes in document order
fn collect_images(document: &Html) -> Vec<String> {
    let Ok(sel) = Selector::parse("img[src]") else {
        return Vec::new();
    };

    document
        .select(&sel)
        .filter_map(|el| el.value().attr("src").map(|s| s.to_string()))
        .take(MAX_IMAGES)
        .collect()
}

/// Scans every link in document order for the first pagination candidate
///
/// A link is a candidate when its visible text contains "next" (any case) or
/// ">", its class attribute contains "next", or its href carries a page query
/// or path segment. Candidates that fail to resolve against the source URL
/// are passed over and scanning continues.
fn detect_next_url(document: &Html, source_url: &Url) -> Option<Url> {
    let sel = Selector::parse("a[href]").ok()?;

    for element in document.select(&sel) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let text = element_text(element).to_lowercase();
        let class = element.value().attr("class").unwrap_or("");

        let is_candidate = text.contains("next")
            || text.contains('>')
            || class.contains("next")
            || href.contains("?page=")
            || href.contains("&page=")
            || href.contains("/page/");

        if is_candidate {
            match source_url.join(href) {
                Ok(resolved) => return Some(resolved),
                Err(_) => continue,
            }
        }
    }

    None
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Url {
        Url::parse("https://example.com/catalog").unwrap()
    }

    fn extract_page(html: &str) -> ExtractedPage {
        match extract(html, &source()) {
            Extraction::Page(page) => *page,
            Extraction::Skip { .. } => panic!("expected a full page, got a skip"),
        }
    }

    #[test]
    fn test_extract_title_and_h1() {
        let html = r#"<html><head><title> Shop </title></head>
            <body><h1>Welcome</h1><a href="/x">x</a></body></html>"#;
        let page = extract_page(html);
        assert_eq!(page.title, "Shop");
        assert_eq!(page.h1, "Welcome");
    }

    #[test]
    fn test_meta_description_priority() {
        let html = r#"<html><head>
            <meta property="og:description" content="from og">
            <meta name="description" content="from name">
            </head><body><h1>x</h1><a href="/x">x</a></body></html>"#;
        let page = extract_page(html);
        // meta[name=description] wins over og:description
        assert_eq!(page.meta_description, "from name");
    }

    #[test]
    fn test_meta_description_falls_back_to_og() {
        let html = r#"<html><head>
            <meta property="og:description" content="from og">
            <meta property="og:title" content="og title">
            </head><body><h1>x</h1><a href="/x">x</a></body></html>"#;
        let page = extract_page(html);
        assert_eq!(page.meta_description, "from og");
        assert_eq!(page.meta_title, "og title");
    }

    #[test]
    fn test_collection_caps() {
        let headings: String = (0..15).map(|i| format!("<h2>Heading {}</h2>", i)).collect();
        let paragraphs: String = (0..8).map(|i| format!("<p>Para {}</p>", i)).collect();
        let items: String = (0..8).map(|i| format!("<li>Item {}</li>", i)).collect();
        let links: String = (0..8)
            .map(|i| format!("<a href=\"/l{}\">L{}</a>", i, i))
            .collect();
        let images: String = (0..8)
            .map(|i| format!("<img src=\"/img{}.png\">", i))
            .collect();
        let html = format!(
            "<html><body>{}{}<ul>{}</ul>{}{}</body></html>",
            headings, paragraphs, items, links, images
        );

        let page = extract_page(&html);
        assert_eq!(page.headings.len(), 10);
        assert_eq!(page.paragraphs.len(), 5);
        assert_eq!(page.list_items.len(), 5);
        assert_eq!(page.links.len(), 5);
        assert_eq!(page.images.len(), 5);
    }

    #[test]
    fn test_headings_in_document_order() {
        let html = r#"<html><body>
            <h2>Second level</h2>
            <h1>Top</h1>
            <h3>Third</h3>
            <a href="/x">x</a></body></html>"#;
        let page = extract_page(html);
        assert_eq!(page.headings, vec!["Second level", "Top", "Third"]);
    }

    #[test]
    fn test_body_text_collapsed_and_truncated() {
        let filler = "word ".repeat(400);
        let html = format!(
            "<html><body><p>  spaced\n\n   out  </p><p>{}</p><a href=\"/x\">x</a></body></html>",
            filler
        );
        let page = extract_page(&html);
        assert!(page.body_text.starts_with("spaced out word"));
        assert_eq!(page.body_text.chars().count(), 1000);
    }

    #[test]
    fn test_links_keep_raw_href() {
        let html = r#"<html><body><h1>x</h1>
            <a href="/relative">Rel</a>
            <a href="https://example.com/abs">Abs</a>
            </body></html>"#;
        let page = extract_page(html);
        assert_eq!(page.links[0].href, "/relative");
        assert_eq!(page.links[0].text, "Rel");
        assert_eq!(page.links[1].href, "https://example.com/abs");
    }

    #[test]
    fn test_status_success_with_links() {
        let html = r#"<html><body><h1>Data</h1><a href="/x">x</a></body></html>"#;
        assert_eq!(extract_page(html).status, PageStatus::Success);
    }

    #[test]
    fn test_status_partial_when_no_links() {
        // Data but zero links
        let html = r#"<html><head><title>Home</title></head>
            <body><h1>Only heading</h1><p>Fifty characters of body text for this page here.</p></body></html>"#;
        let page = extract_page(html);
        assert_eq!(page.status, PageStatus::Partial);
        assert!(page.links.is_empty());
    }

    #[test]
    fn test_blocked_overrides_other_statuses() {
        let html = r#"<html><body><h1>Checking your browser</h1>
            <p>Cloudflare is verifying</p><a href="/x">x</a></body></html>"#;
        assert_eq!(extract_page(html).status, PageStatus::Blocked);
    }

    #[test]
    fn test_blocked_detection_is_case_insensitive() {
        let html = r#"<html><body><p>ACCESS DENIED</p></body></html>"#;
        assert_eq!(extract_page(html).status, PageStatus::Blocked);
    }

    #[test]
    fn test_blocked_page_is_never_skipped() {
        // Tiny page with no data, but a block marker: must yield a record
        let html = "<html><body>blocked</body></html>";
        assert!(matches!(extract(html, &source()), Extraction::Page(_)));
    }

    #[test]
    fn test_empty_page_is_skipped() {
        let result = extract("<html><body></body></html>", &source());
        match result {
            Extraction::Skip { links } => assert!(links.is_empty()),
            Extraction::Page(_) => panic!("expected skip"),
        }
    }

    #[test]
    fn test_skip_still_harvests_links() {
        let html = r#"<html><body><a href="/a"></a><a href="/b"></a></body></html>"#;
        match extract(html, &source()) {
            Extraction::Skip { links } => {
                assert_eq!(links.len(), 2);
                assert_eq!(links[0].href, "/a");
            }
            Extraction::Page(_) => panic!("expected skip"),
        }
    }

    #[test]
    fn test_large_empty_page_is_not_skipped() {
        // No data, but HTML is >= 2000 bytes, so a record is still produced
        let html = format!("<html><body><!-- {} --></body></html>", "x".repeat(2500));
        assert!(matches!(extract(&html, &source()), Extraction::Page(_)));
    }

    #[test]
    fn test_next_url_from_link_text() {
        let html = r#"<html><body><h1>x</h1>
            <a href="/other">Other</a>
            <a href="/step2">Next page</a></body></html>"#;
        let page = extract_page(html);
        assert_eq!(
            page.next_url.unwrap().as_str(),
            "https://example.com/step2"
        );
    }

    #[test]
    fn test_next_url_from_class() {
        let html = r#"<html><body><h1>x</h1>
            <a class="next-page" href="/page/2">More</a></body></html>"#;
        let page = extract_page(html);
        assert_eq!(
            page.next_url.unwrap().as_str(),
            "https://example.com/page/2"
        );
    }

    #[test]
    fn test_next_url_from_href_query() {
        let html = r#"<html><body><h1>x</h1>
            <a href="/list?page=3">3</a></body></html>"#;
        let page = extract_page(html);
        assert_eq!(
            page.next_url.unwrap().as_str(),
            "https://example.com/list?page=3"
        );
    }

    #[test]
    fn test_next_url_first_match_wins() {
        let html = r#"<html><body><h1>x</h1>
            <a href="/list?page=2">two</a>
            <a href="/list?page=3">three</a></body></html>"#;
        let page = extract_page(html);
        assert_eq!(
            page.next_url.unwrap().as_str(),
            "https://example.com/list?page=2"
        );
    }

    #[test]
    fn test_no_next_url_without_pagination_hints() {
        let html = r#"<html><body><h1>x</h1>
            <a href="/about">About us</a></body></html>"#;
        assert!(extract_page(html).next_url.is_none());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = r#"<html><head><title>Page</title></head>
            <body><h1>H</h1><a href="/a">a</a><a class="next" href="/page/2">»</a></body></html>"#;
        let first = extract(html, &source());
        let second = extract(html, &source());
        assert_eq!(first, second);
    }
}
