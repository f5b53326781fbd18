//! Sitemap renderer
//!
//! Writes a tree depth-first, pre-order, one URL per line:
//!
//! ```text
//! https://test.com
//!     - https://test.com/sub1/
//!         - https://test.com/sub1/deeper
//!     - https://test.com/sub2/
//! ```

use crate::config::OutputConfig;
use crate::sitemap::PageNode;
use crate::SitemapError;
use std::io::Write;

/// Indentation and marker used for every non-root line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapStyle {
    /// Repeated once per level of depth
    pub indent_unit: String,

    /// Written between the indentation and the URL
    pub separator: String,
}

impl Default for SitemapStyle {
    fn default() -> Self {
        Self {
            indent_unit: "    ".to_string(),
            separator: "- ".to_string(),
        }
    }
}

impl From<&OutputConfig> for SitemapStyle {
    fn from(config: &OutputConfig) -> Self {
        Self {
            indent_unit: config.indent_unit.clone(),
            separator: config.separator.clone(),
        }
    }
}

/// What happened while rendering a tree
#[derive(Debug, Default)]
pub struct RenderReport {
    /// Lines written without error
    pub lines_written: usize,

    /// One `SitemapError::Write` per line that could not be written
    pub failures: Vec<SitemapError>,
}

impl RenderReport {
    /// Returns true if every line was written
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Renders `root` into `writer`
///
/// The root's URL is written alone on the first line. Every other node is
/// written as `indent_unit` repeated once per edge from the root, then
/// `separator`, then the URL. Each line goes to `writer` in a single
/// `write_all`. A line that fails to write is recorded in the report and
/// rendering carries on with the next node.
///
/// # Example
///
/// ```
/// use subsite_mapper::output::{render, SitemapStyle};
/// use subsite_mapper::sitemap::PageNode;
/// use subsite_mapper::url::{parse_start_url, resolve};
///
/// let mut root = PageNode::new(parse_start_url("https://test.com").unwrap());
/// root.push_child(PageNode::new(resolve("/sub1/", root.url()).unwrap()));
///
/// let mut out = Vec::new();
/// let report = render(&root, &mut out, &SitemapStyle::default());
/// assert!(report.is_complete());
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "https://test.com\n    - https://test.com/sub1/\n"
/// );
/// ```
pub fn render<W: Write>(root: &PageNode, writer: &mut W, style: &SitemapStyle) -> RenderReport {
    let mut report = RenderReport::default();

    for (depth, node) in root.walk() {
        let line = if depth == 0 {
            format!("{}\n", node.as_str())
        } else {
            format!(
                "{}{}{}\n",
                style.indent_unit.repeat(depth),
                style.separator,
                node.as_str()
            )
        };

        match writer.write_all(line.as_bytes()) {
            Ok(()) => report.lines_written += 1,
            Err(source) => {
                tracing::error!(
                    "Failed to write sitemap line for {}: {}",
                    node.as_str(),
                    source
                );
                report.failures.push(SitemapError::Write {
                    url: node.as_str().to_string(),
                    source,
                });
            }
        }
    }

    report
}

/// Renders `root` into a `String`
pub fn render_to_string(root: &PageNode, style: &SitemapStyle) -> String {
    let mut buffer = Vec::new();
    render(root, &mut buffer, style);
    String::from_utf8_lossy(&buffer).into_owned()
}
