use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the reference hostname a crawl filters against
///
/// The reference hostname is taken once from the crawl's root URL and every
/// discovered link is compared with it by exact string equality.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use subsite_mapper::url::reference_hostname;
///
/// let url = Url::parse("https://blog.example.com/posts").unwrap();
/// assert_eq!(reference_hostname(&url).unwrap(), "blog.example.com");
/// ```
pub fn reference_hostname(url: &Url) -> UrlResult<String> {
    url.host_str()
        .filter(|host| !host.is_empty())
        .map(str::to_string)
        .ok_or_else(|| UrlError::MissingHost(url.to_string()))
}

/// Returns true if `url`'s hostname is exactly `hostname`
///
/// Subdomains are different hosts: `www.example.com` does not match
/// `example.com`. Ports are not part of the hostname.
pub fn is_same_host(url: &Url, hostname: &str) -> bool {
    url.host_str() == Some(hostname)
}
