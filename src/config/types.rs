use serde::Deserialize;

/// Main configuration structure for Subsite-Mapper
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

/// What to crawl
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// URL the crawl starts from; its hostname bounds the crawl
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Number of link edges to follow from the start page
    #[serde(rename = "max-depth")]
    pub max_depth: u32,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            start_url: "https://monzo.com".to_string(),
            max_depth: 4,
        }
    }
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds; no timeout when absent
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    /// Maximum fetches in flight at once; unbounded when absent
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: Option<usize>,

    /// Treat non-2xx statuses and non-HTML Content-Types as fetch failures
    ///
    /// Off by default: every response body is scanned for links,
    /// whatever its status.
    #[serde(rename = "strict-responses")]
    pub strict_responses: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("subsite-mapper/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
            max_concurrent_fetches: None,
            strict_responses: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the `<hostname>.txt` sitemap is written to
    pub directory: String,

    /// File log lines are appended to, in addition to stdout
    #[serde(rename = "log-file")]
    pub log_file: Option<String>,

    /// Indentation repeated once per level of depth
    #[serde(rename = "indent-unit")]
    pub indent_unit: String,

    /// Marker written between the indentation and the URL
    pub separator: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
            log_file: Some("run.log".to_string()),
            indent_unit: "    ".to_string(),
            separator: "- ".to_string(),
        }
    }
}
