//! Crawler module for page fetching and tree building
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetch` seam
//! - HTML parsing and same-host link extraction
//! - The completion barrier shared by all traversal tasks
//! - Overall crawl coordination

mod barrier;
mod coordinator;
mod fetcher;
mod parser;

pub use barrier::{CompletionBarrier, Registration};
pub use coordinator::{CrawlOutcome, Crawler, PageFailure};
pub use fetcher::{build_http_client, Fetch, FetchedPage, HttpFetcher};
pub use parser::extract_links;

use crate::config::Config;
use crate::SitemapError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client from the fetch configuration
/// 2. Apply the optional fetch concurrency cap
/// 3. Crawl from the configured start URL to the configured depth
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl completed; per-page failures are inside
/// * `Err(SitemapError)` - The start URL was malformed or the client could not be built
pub async fn crawl(config: &Config) -> Result<CrawlOutcome, SitemapError> {
    let fetcher = HttpFetcher::new(&config.fetch)?;
    let mut crawler = Crawler::new(fetcher);

    if let Some(limit) = config.fetch.max_concurrent_fetches {
        crawler = crawler.with_max_concurrent_fetches(limit);
    }

    crawler
        .crawl(&config.crawl.start_url, config.crawl.max_depth)
        .await
}
