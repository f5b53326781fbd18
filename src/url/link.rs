use std::fmt;
use url::Url;

/// An absolute URL paired with the text it is reported as
///
/// The parsed `Url` is what relative hrefs are joined onto and what the
/// same-host check reads. The text is what ends up in the sitemap:
/// absolute hrefs and the start URL keep the exact text they were written
/// with, relative hrefs take the serialized form of the joined URL.
///
/// # Examples
///
/// ```
/// use subsite_mapper::url::{parse_start_url, resolve};
///
/// let root = parse_start_url("https://test.com").unwrap();
/// assert_eq!(root.as_str(), "https://test.com");
/// assert_eq!(root.url().as_str(), "https://test.com/");
///
/// let child = resolve("/sub1/", root.url()).unwrap();
/// assert_eq!(child.as_str(), "https://test.com/sub1/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    url: Url,
    text: String,
}

impl Link {
    /// Pairs `url` with the text it was written as
    pub(crate) fn as_written(url: Url, text: &str) -> Self {
        Self {
            url,
            text: text.to_string(),
        }
    }

    /// The parsed URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL text used for output and per-page duplicate checks
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<Url> for Link {
    fn from(url: Url) -> Self {
        let text = url.to_string();
        Self { url, text }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
