use crate::url::Link;
use crate::{UrlError, UrlResult};
use url::{ParseError, Url};

/// Resolves a raw `href` value against the URL of the page it appeared on
///
/// # Resolution Rules
///
/// 1. If `raw_href` parses as an absolute URL, it is returned unchanged:
///    the link's text is `raw_href` exactly as written
/// 2. If it only parses as a relative reference, it is joined onto `base`
///    (scheme and host come from `base`, the path is resolved against
///    `base`'s path) and the link's text is the joined URL
/// 3. Anything else is malformed
///
/// # Arguments
///
/// * `raw_href` - The attribute value exactly as it appeared in the page
/// * `base` - The URL of the page the href was found on
///
/// # Returns
///
/// * `Ok(Link)` - The absolute URL and its text
/// * `Err(UrlError::Malformed)` - The href is not a URL reference at all
///
/// # Examples
///
/// ```
/// use subsite_mapper::url::resolve;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// let link = resolve("setup", &base).unwrap();
/// assert_eq!(link.as_str(), "https://example.com/docs/setup");
///
/// let link = resolve("https://example.com", &base).unwrap();
/// assert_eq!(link.as_str(), "https://example.com");
/// ```
pub fn resolve(raw_href: &str, base: &Url) -> UrlResult<Link> {
    match Url::parse(raw_href) {
        Ok(url) => Ok(Link::as_written(url, raw_href)),
        Err(ParseError::RelativeUrlWithoutBase) => base
            .join(raw_href)
            .map(Link::from)
            .map_err(|source| UrlError::Malformed {
                input: raw_href.to_string(),
                source,
            }),
        Err(source) => Err(UrlError::Malformed {
            input: raw_href.to_string(),
            source,
        }),
    }
}

/// Parses and validates the URL a crawl starts from
///
/// The start URL must be absolute and must carry a host, because that host
/// becomes the reference hostname for the whole crawl. The returned link
/// keeps `input` as its text.
///
/// # Examples
///
/// ```
/// use subsite_mapper::url::parse_start_url;
///
/// assert!(parse_start_url("https://example.com").is_ok());
/// assert!(parse_start_url("not a url").is_err());
/// ```
pub fn parse_start_url(input: &str) -> UrlResult<Link> {
    let url = Url::parse(input).map_err(|source| UrlError::Malformed {
        input: input.to_string(),
        source,
    })?;

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(input.to_string()));
    }

    Ok(Link::as_written(url, input))
}
