use crate::output::render::{render, RenderReport, SitemapStyle};
use crate::sitemap::PageNode;
use crate::SitemapError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Returns the sitemap file path for a crawl of `hostname`
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use subsite_mapper::output::sitemap_path;
///
/// let path = sitemap_path(Path::new("out"), "example.com");
/// assert_eq!(path, Path::new("out/example.com.txt"));
/// ```
pub fn sitemap_path(directory: &Path, hostname: &str) -> PathBuf {
    directory.join(format!("{}.txt", hostname))
}

/// Creates (or truncates) `path` and renders `root` into it
///
/// # Returns
///
/// * `Ok(RenderReport)` - The file was created and flushed; individual line
///   failures are listed in the report
/// * `Err(SitemapError::Io)` - The file could not be created or flushed
pub fn write_sitemap(
    root: &PageNode,
    path: &Path,
    style: &SitemapStyle,
) -> Result<RenderReport, SitemapError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let report = render(root, &mut writer, style);
    writer.flush()?;

    tracing::info!(
        "Wrote {} sitemap lines to {}",
        report.lines_written,
        path.display()
    );

    Ok(report)
}
