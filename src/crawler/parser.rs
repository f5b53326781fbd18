//! Link extractor
//!
//! This module scans a page's anchors in document order and keeps the links
//! that resolve onto the crawl's reference hostname, once each.

use crate::url::{is_same_host, resolve, Link};
use crate::UrlResult;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts the same-host links found on one page
///
/// # Extraction Rules
///
/// 1. Every `<a>` element is visited in document order
/// 2. Anchors without an `href` attribute are skipped
/// 3. The `href` is resolved against `page_url`
/// 4. Links whose hostname differs from `reference_host` are discarded
/// 5. A link already returned earlier on this page is discarded
///
/// Duplicate suppression covers this page only; the same URL found on
/// another page is returned again there.
///
/// # Arguments
///
/// * `html` - The page body
/// * `page_url` - The URL the page was fetched from, used as the base
/// * `reference_host` - The crawl's reference hostname
///
/// # Returns
///
/// * `Ok(Vec<Link>)` - Links in discovery order
/// * `Err(UrlError)` - An `href` was malformed; the whole page is abandoned
///
/// # Example
///
/// ```
/// use subsite_mapper::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/about">About</a><a href="https://elsewhere.org/">Out</a>"#;
/// let page = Url::parse("https://example.com/").unwrap();
/// let links = extract_links(html, &page, "example.com").unwrap();
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://example.com/about");
/// ```
pub fn extract_links(html: &str, page_url: &Url, reference_host: &str) -> UrlResult<Vec<Link>> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    if let Ok(anchor_selector) = Selector::parse("a") {
        for element in document.select(&anchor_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let link = resolve(href, page_url)?;

            if !is_same_host(link.url(), reference_host) {
                tracing::info!("Skipping off-host link {} on {}", link, page_url);
                continue;
            }

            if !seen.insert(link.as_str().to_string()) {
                tracing::trace!("Skipping duplicate link {} on {}", link, page_url);
                continue;
            }

            links.push(link);
        }
    }

    Ok(links)
}
