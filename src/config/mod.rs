//! Configuration module for Subsite-Mapper
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a missing or empty file yields a usable config.
//!
//! # Example
//!
//! ```no_run
//! use subsite_mapper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("subsite-mapper.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawl.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, FetchConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
