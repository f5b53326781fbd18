//! Subsite-Mapper: a same-subdomain sitemap crawler
//!
//! This crate fetches a starting page, follows the links that stay on the
//! starting page's host down to a fixed depth, and writes the resulting
//! link tree as an indented textual sitemap.

pub mod config;
pub mod crawler;
pub mod output;
pub mod sitemap;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Subsite-Mapper operations
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP error for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("Failed to read page body for {url}: {message}")]
    Extraction { url: String, message: String },

    #[error("Failed to write sitemap line for {url}: {source}")]
    Write {
        url: String,
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Malformed URL '{input}': {source}")]
    Malformed {
        input: String,
        source: ::url::ParseError,
    },

    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// Result type alias for Subsite-Mapper operations
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlOutcome, Crawler, Fetch, HttpFetcher};
pub use output::{render, render_to_string, RenderReport, SitemapStyle};
pub use sitemap::PageNode;
pub use state::TraversalState;
pub use crate::url::{parse_start_url, reference_hostname, resolve, Link};
