//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - The `Fetch` seam the orchestrator depends on
//! - Building HTTP clients from the fetch configuration
//! - GET requests and response classification

use crate::config::FetchConfig;
use crate::SitemapError;
use reqwest::{header::CONTENT_TYPE, Client};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// A fetched page body ready for link extraction
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// Page body content
    pub body: String,
}

/// Source of page bodies for the crawl
///
/// The orchestrator only needs "give me the HTML behind this URL". Anything
/// that can answer that (a real HTTP client, an in-memory site in tests)
/// can drive a crawl.
pub trait Fetch: Send + Sync {
    /// Fetches the page at `url`
    ///
    /// # Returns
    ///
    /// * `Ok(FetchedPage)` - The page body
    /// * `Err(SitemapError)` - Transport or body-read failure, plus status and
    ///   content-type failures when the source is strict about responses
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, SitemapError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use subsite_mapper::config::FetchConfig;
/// use subsite_mapper::crawler::build_http_client;
///
/// let config = FetchConfig {
///     user_agent: "subsite-mapper/0.1".to_string(),
///     timeout_secs: Some(30),
///     max_concurrent_fetches: None,
///     strict_responses: false,
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .brotli(true);

    // No timeout unless configured: a hung fetch stalls only its own branch
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// `Fetch` implementation backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    strict_responses: bool,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &FetchConfig) -> Result<Self, SitemapError> {
        Ok(Self {
            client: build_http_client(config)?,
            strict_responses: config.strict_responses,
        })
    }
}

impl Fetch for HttpFetcher {
    /// Fetches a URL and classifies the response
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | Connection/transport error | `Fetch` |
    /// | Non-2xx status, strict only | `Status` |
    /// | Content-Type present and not HTML, strict only | `ContentMismatch` |
    /// | Body cannot be read | `Extraction` |
    ///
    /// Without `strict-responses` an error page is returned like any other
    /// page, so links on a 404 page are still followed.
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, SitemapError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|source| SitemapError::Fetch {
                url: url.to_string(),
                source,
            })?;

        if self.strict_responses {
            check_response(url, &response)?;
        } else if !response.status().is_success() {
            tracing::warn!(
                "{} answered HTTP {}; scanning its body anyway",
                url,
                response.status().as_u16()
            );
        }

        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| SitemapError::Extraction {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(FetchedPage { final_url, body })
    }
}

/// Rejects non-2xx responses and responses that declare a non-HTML body
///
/// A missing Content-Type passes.
fn check_response(url: &Url, response: &reqwest::Response) -> Result<(), SitemapError> {
    let status = response.status();
    if !status.is_success() {
        return Err(SitemapError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    if let Some(content_type) = content_type {
        if !is_html(content_type) {
            return Err(SitemapError::ContentMismatch {
                url: url.to_string(),
                content_type: content_type.to_string(),
            });
        }
    }

    Ok(())
}

/// Returns true if a Content-Type header value describes an HTML document
fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}
