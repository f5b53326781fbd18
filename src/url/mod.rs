//! URL handling module for Subsite-Mapper
//!
//! This module resolves raw `href` values against the page they were found
//! on, validates the crawl's start URL, and answers the same-host question
//! used to keep the crawl on a single subdomain.

mod domain;
mod link;
mod resolve;

// Re-export main functions
pub use domain::{is_same_host, reference_hostname};
pub use link::Link;
pub use resolve::{parse_start_url, resolve};
