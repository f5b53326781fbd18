//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end through the real HTTP fetcher.

use subsite_mapper::config::{Config, FetchConfig};
use subsite_mapper::crawler::{crawl, Crawler, HttpFetcher};
use subsite_mapper::output::{render_to_string, sitemap_path, write_sitemap, SitemapStyle};
use subsite_mapper::{PageNode, SitemapError, TraversalState, UrlError};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a fetcher with a short timeout so a broken test cannot hang
fn test_fetcher() -> HttpFetcher {
    fetcher_with_strictness(false)
}

fn fetcher_with_strictness(strict_responses: bool) -> HttpFetcher {
    HttpFetcher::new(&FetchConfig {
        user_agent: "TestBot/1.0".to_string(),
        timeout_secs: Some(10),
        max_concurrent_fetches: None,
        strict_responses,
    })
    .expect("Failed to build fetcher")
}

/// An HTML page containing one anchor per href
fn html_page(hrefs: &[&str]) -> ResponseTemplate {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", anchors),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, page: &str, hrefs: &[&str]) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html_page(hrefs))
        .mount(server)
        .await;
}

fn child_urls(node: &PageNode) -> Vec<String> {
    node.children()
        .iter()
        .map(|c| c.url().path().to_string())
        .collect()
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let page1 = format!("{}/page1", base_url);

    mount_page(
        &mock_server,
        "/",
        &[&page1, "/page2", "https://external.example.org/"],
    )
    .await;
    mount_page(&mock_server, "/page1", &["/page2", "/page1"]).await;
    mount_page(&mock_server, "/page2", &[]).await;

    let outcome = Crawler::new(test_fetcher())
        .crawl(&base_url, 2)
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.reference_hostname, "127.0.0.1");
    assert_eq!(outcome.pages_fetched, 3);
    assert!(outcome.failures.is_empty());

    let root = &outcome.root;
    assert_eq!(child_urls(root), vec!["/page1", "/page2"]);
    assert_eq!(child_urls(&root.children()[0]), vec!["/page2", "/page1"]);
    assert!(root.children()[1].is_leaf());

    let rendered = render_to_string(root, &SitemapStyle::default());
    let expected = format!(
        concat!(
            "{base}\n",
            "    - {base}/page1\n",
            "        - {base}/page2\n",
            "        - {base}/page1\n",
            "    - {base}/page2\n",
        ),
        base = base_url
    );
    assert_eq!(rendered, expected);
}

#[tokio::test]
async fn test_crawl_with_depth_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&["/level1"]))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Depth 1 attaches /level1 as a leaf without ever requesting it
    Mock::given(method("GET"))
        .and(path("/level1"))
        .respond_with(html_page(&["/level2"]))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = Crawler::new(test_fetcher())
        .crawl(&base_url, 1)
        .await
        .expect("Crawl failed");

    assert_eq!(child_urls(&outcome.root), vec!["/level1"]);
    assert!(outcome.root.children()[0].is_leaf());
    assert_eq!(outcome.root.height(), 1);
}

#[tokio::test]
async fn test_depth_zero_makes_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(html_page(&["/anything"]))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = Crawler::new(test_fetcher())
        .crawl(&mock_server.uri(), 0)
        .await
        .expect("Crawl failed");

    assert!(outcome.root.is_leaf());
    assert_eq!(outcome.pages_fetched, 0);
}

#[tokio::test]
async fn test_malformed_start_url_makes_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = Crawler::new(test_fetcher()).crawl("not a url", 3).await;
    assert!(matches!(
        result,
        Err(SitemapError::Url(UrlError::Malformed { .. }))
    ));
}

#[tokio::test]
async fn test_shared_page_is_fetched_once_per_branch() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/a", "/b"]).await;
    mount_page(&mock_server, "/a", &["/shared"]).await;
    mount_page(&mock_server, "/b", &["/shared"]).await;

    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(html_page(&["/leaf"]))
        .expect(2)
        .mount(&mock_server)
        .await;

    let outcome = Crawler::new(test_fetcher())
        .crawl(&mock_server.uri(), 3)
        .await
        .expect("Crawl failed");

    for branch in outcome.root.children() {
        assert_eq!(child_urls(branch), vec!["/shared"]);
        assert_eq!(child_urls(&branch.children()[0]), vec!["/leaf"]);
    }
    assert_eq!(outcome.root.node_count(), 7);
}

#[tokio::test]
async fn test_error_pages_are_scanned_for_links() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/gone"]).await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_raw(r#"<a href="/home">Back home</a>"#, "text/html"),
        )
        .mount(&mock_server)
        .await;

    let outcome = Crawler::new(test_fetcher())
        .crawl(&mock_server.uri(), 2)
        .await
        .expect("Crawl failed");

    let gone = &outcome.root.children()[0];
    assert_eq!(child_urls(gone), vec!["/home"]);
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.pages_fetched, 2);
}

#[tokio::test]
async fn test_strict_http_errors_are_local() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/missing", "/broken", "/ok"]).await;
    mount_page(&mock_server, "/ok", &["/ok/child"]).await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_raw(r#"<a href="/hidden">Hidden</a>"#, "text/html"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let outcome = Crawler::new(fetcher_with_strictness(true))
        .crawl(&mock_server.uri(), 2)
        .await
        .expect("Crawl failed");

    let root = &outcome.root;
    assert_eq!(child_urls(root), vec!["/missing", "/broken", "/ok"]);
    assert!(root.children()[0].is_leaf());
    assert!(root.children()[1].is_leaf());
    assert_eq!(child_urls(&root.children()[2]), vec!["/ok/child"]);

    let mut failed: Vec<&str> = outcome.failures.iter().map(|f| f.url.path()).collect();
    failed.sort();
    assert_eq!(failed, vec!["/broken", "/missing"]);
}

async fn mount_content_type_site(server: &MockServer) {
    mount_page(server, "/", &["/report.pdf", "/page"]).await;
    mount_page(server, "/page", &["/next"]).await;

    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<a href="/hidden">not html</a>"#,
            "application/pdf",
        ))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_content_type_ignored_by_default() {
    let mock_server = MockServer::start().await;
    mount_content_type_site(&mock_server).await;

    let outcome = Crawler::new(test_fetcher())
        .crawl(&mock_server.uri(), 2)
        .await
        .expect("Crawl failed");

    let root = &outcome.root;
    assert_eq!(child_urls(&root.children()[0]), vec!["/hidden"]);
    assert_eq!(child_urls(&root.children()[1]), vec!["/next"]);
    assert!(outcome.failures.is_empty());
}

#[tokio::test]
async fn test_strict_content_type_handling() {
    let mock_server = MockServer::start().await;
    mount_content_type_site(&mock_server).await;

    let outcome = Crawler::new(fetcher_with_strictness(true))
        .crawl(&mock_server.uri(), 2)
        .await
        .expect("Crawl failed");

    let root = &outcome.root;
    assert!(root.children()[0].is_leaf());
    assert_eq!(child_urls(&root.children()[1]), vec!["/next"]);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].state, TraversalState::Fetching);
    assert!(outcome.failures[0].error.contains("application/pdf"));
}

#[tokio::test]
async fn test_crawl_from_config_with_fetch_limit() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", &["/one", "/two", "/three"]).await;
    mount_page(&mock_server, "/one", &["/two"]).await;
    mount_page(&mock_server, "/two", &["/three"]).await;
    mount_page(&mock_server, "/three", &["/one"]).await;

    let mut config = Config::default();
    config.crawl.start_url = mock_server.uri();
    config.crawl.max_depth = 3;
    config.fetch.timeout_secs = Some(10);
    config.fetch.max_concurrent_fetches = Some(2);

    let outcome = crawl(&config).await.expect("Crawl failed");

    assert_eq!(outcome.pages_fetched, 1 + 3 + 3);
    assert_eq!(outcome.root.height(), 3);
    for (depth, node) in outcome.root.walk() {
        if depth == 3 {
            assert!(node.is_leaf());
        }
    }
}

#[tokio::test]
async fn test_sitemap_file_written_for_host() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", &["/sub1/", "/sub2/"]).await;

    let outcome = Crawler::new(test_fetcher())
        .crawl(&base_url, 1)
        .await
        .expect("Crawl failed");

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = sitemap_path(dir.path(), &outcome.reference_hostname);
    assert!(path.ends_with("127.0.0.1.txt"));

    let report = write_sitemap(&outcome.root, &path, &SitemapStyle::default())
        .expect("Failed to write sitemap");
    assert_eq!(report.lines_written, 3);

    let content = std::fs::read_to_string(&path).expect("Failed to read sitemap");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            base_url.clone(),
            format!("    - {}/sub1/", base_url),
            format!("    - {}/sub2/", base_url),
        ]
    );
}
