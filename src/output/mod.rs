//! Output module for writing the textual sitemap
//!
//! This module handles:
//! - Rendering a `PageNode` tree as indented text
//! - Choosing the sitemap file path for a crawl
//! - Writing the rendered sitemap to that file

mod file;
mod render;

pub use file::{sitemap_path, write_sitemap};
pub use render::{render, render_to_string, RenderReport, SitemapStyle};
