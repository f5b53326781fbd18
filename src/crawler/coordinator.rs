//! Crawler coordinator - depth-bounded concurrent traversal
//!
//! This module turns a start URL into a `PageNode` tree:
//! - Validating the start URL and fixing the reference hostname
//! - Spawning one traversal task per page node within the depth budget
//! - Collecting each subtree back into its parent in discovery order
//! - Waiting on the completion barrier before handing the tree out

use crate::crawler::barrier::CompletionBarrier;
use crate::crawler::fetcher::{Fetch, FetchedPage};
use crate::crawler::parser::extract_links;
use crate::sitemap::PageNode;
use crate::state::TraversalState;
use crate::url::{parse_start_url, reference_hostname, Link};
use crate::SitemapError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle};
use url::Url;

/// A page whose traversal ended without expanding it
#[derive(Debug, Clone)]
pub struct PageFailure {
    /// The page that failed
    pub url: Url,

    /// The step the traversal was in when it failed: `Fetching` or
    /// `Extracting`, or `Aborted` when the task itself died
    pub state: TraversalState,

    /// Error description
    pub error: String,
}

/// Result of a completed crawl
#[derive(Debug)]
pub struct CrawlOutcome {
    /// The finished sitemap tree
    pub root: PageNode,

    /// Hostname every node in the tree shares
    pub reference_hostname: String,

    /// Pages whose fetch or extraction failed, in tree order
    pub failures: Vec<PageFailure>,

    /// Number of pages fetched and extracted successfully
    pub pages_fetched: usize,
}

/// Main crawler structure
///
/// Owns the page source and the optional fetch gate. A single `Crawler` can
/// run any number of crawls; each crawl gets its own barrier and reference
/// hostname.
pub struct Crawler<F> {
    fetcher: Arc<F>,
    fetch_permits: Option<Arc<Semaphore>>,
}

impl<F: Fetch + 'static> Crawler<F> {
    /// Creates a crawler with unbounded fan-out
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            fetch_permits: None,
        }
    }

    /// Caps how many fetches may be in flight at once
    ///
    /// Only the fetch itself holds a permit. A task waiting on its children
    /// holds none, so the cap cannot deadlock the tree. `limit` is clamped to
    /// `1..=Semaphore::MAX_PERMITS`.
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        let permits = limit.clamp(1, Semaphore::MAX_PERMITS);
        self.fetch_permits = Some(Arc::new(Semaphore::new(permits)));
        self
    }

    /// Crawls from `start_url` following same-host links up to `max_depth` edges
    ///
    /// # Depth
    ///
    /// * `0` - The root is neither fetched nor expanded
    /// * `N` - Nodes up to `N` edges from the root appear in the tree; nodes
    ///   at exactly `N` are attached as leaves and never fetched
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - The crawl ran to completion. Per-page failures
    ///   are reported in `failures`, never as an `Err`
    /// * `Err(SitemapError::Url)` - The start URL is malformed; nothing was fetched
    ///
    /// # Example
    ///
    /// ```no_run
    /// use subsite_mapper::config::FetchConfig;
    /// use subsite_mapper::crawler::{Crawler, HttpFetcher};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let fetcher = HttpFetcher::new(&FetchConfig::default())?;
    /// let outcome = Crawler::new(fetcher).crawl("https://example.com", 2).await?;
    /// println!("{} pages in the sitemap", outcome.root.node_count());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn crawl(
        &self,
        start_url: &str,
        max_depth: u32,
    ) -> Result<CrawlOutcome, SitemapError> {
        let root = parse_start_url(start_url)?;
        let reference_hostname = reference_hostname(root.url())?;

        tracing::info!(
            "Starting crawl of {} (host {}, depth {})",
            root,
            reference_hostname,
            max_depth
        );

        let barrier = Arc::new(CompletionBarrier::new());
        let context = Arc::new(CrawlContext {
            fetcher: Arc::clone(&self.fetcher),
            fetch_permits: self.fetch_permits.clone(),
            reference_hostname: reference_hostname.clone(),
            barrier: Arc::clone(&barrier),
        });

        let handle = spawn_traversal(context, PageNode::new(root.clone()), max_depth);
        barrier.wait().await;

        let traversal = match handle.await {
            Ok(traversal) => traversal,
            Err(e) => {
                tracing::error!("Traversal of {} panicked: {}", root, e);
                Traversal {
                    failures: vec![task_failure(&root, &e)],
                    ..Traversal::new(PageNode::new(root))
                }
            }
        };

        tracing::info!(
            "Crawl completed: {} nodes, {} pages fetched, {} failures",
            traversal.node.node_count(),
            traversal.pages_fetched,
            traversal.failures.len()
        );

        Ok(CrawlOutcome {
            root: traversal.node,
            reference_hostname,
            failures: traversal.failures,
            pages_fetched: traversal.pages_fetched,
        })
    }
}

/// Read-only state shared by every traversal task of one crawl
struct CrawlContext<F> {
    fetcher: Arc<F>,
    fetch_permits: Option<Arc<Semaphore>>,
    reference_hostname: String,
    barrier: Arc<CompletionBarrier>,
}

impl<F: Fetch> CrawlContext<F> {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, SitemapError> {
        // Never closed, so acquire cannot fail
        let _permit = match &self.fetch_permits {
            Some(permits) => permits.acquire().await.ok(),
            None => None,
        };
        self.fetcher.fetch(url).await
    }
}

/// A finished subtree handed back from a traversal task to its parent
#[derive(Debug)]
struct Traversal {
    node: PageNode,
    state: TraversalState,
    failures: Vec<PageFailure>,
    pages_fetched: usize,
}

impl Traversal {
    fn new(node: PageNode) -> Self {
        Self {
            node,
            state: TraversalState::Pending,
            failures: Vec::new(),
            pages_fetched: 0,
        }
    }

    fn advance(&mut self, next: TraversalState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal traversal step {} -> {}",
            self.state,
            next
        );
        tracing::trace!("{}: {} -> {}", self.node.as_str(), self.state, next);
        self.state = next;
    }

    fn abort(mut self, error: SitemapError) -> Self {
        tracing::error!("Error getting links for {}: {}", self.node.as_str(), error);
        self.failures.push(PageFailure {
            url: self.node.url().clone(),
            state: self.state,
            error: error.to_string(),
        });
        self.advance(TraversalState::Aborted);
        self
    }

    fn absorb(&mut self, child: Traversal) {
        debug_assert!(
            child.state.is_terminal(),
            "child {} returned while {}",
            child.node.as_str(),
            child.state
        );
        self.failures.extend(child.failures);
        self.pages_fetched += child.pages_fetched;
        self.node.push_child(child.node);
    }
}

/// A discovered child waiting to be attached to its parent
enum PendingChild {
    /// Attached as-is; the depth budget ran out
    Leaf(PageNode),

    /// Being expanded by its own task
    Spawned(Link, JoinHandle<Traversal>),
}

/// Failure record for a traversal task that panicked or was cancelled
fn task_failure(link: &Link, error: &JoinError) -> PageFailure {
    PageFailure {
        url: link.url().clone(),
        state: TraversalState::Aborted,
        error: format!("traversal task failed: {}", error),
    }
}

/// Registers a traversal with the barrier and starts it on its own task
///
/// Registration happens here, before the task exists, so the barrier can
/// never observe zero while a child is about to start.
fn spawn_traversal<F: Fetch + 'static>(
    context: Arc<CrawlContext<F>>,
    node: PageNode,
    depth: u32,
) -> JoinHandle<Traversal> {
    let registration = context.barrier.register();
    tokio::spawn(async move {
        let _registration = registration;
        traverse(context, node, depth).await
    })
}

/// Fetches, extracts and expands one node
///
/// Failures are recorded on the returned `Traversal` and never propagate:
/// the node simply keeps an empty child list.
async fn traverse<F: Fetch + 'static>(
    context: Arc<CrawlContext<F>>,
    node: PageNode,
    depth: u32,
) -> Traversal {
    tracing::debug!("Starting crawl for {} (depth {})", node.as_str(), depth);
    let mut traversal = Traversal::new(node);

    if depth == 0 {
        traversal.advance(TraversalState::Done);
        return traversal;
    }

    traversal.advance(TraversalState::Fetching);
    let page = match context.fetch(traversal.node.url()).await {
        Ok(page) => page,
        Err(e) => return traversal.abort(e),
    };

    if page.final_url != traversal.node.url().as_str() {
        tracing::debug!("{} redirected to {}", traversal.node.as_str(), page.final_url);
    }

    traversal.advance(TraversalState::Extracting);
    let links = match extract_links(
        &page.body,
        traversal.node.url(),
        &context.reference_hostname,
    ) {
        Ok(links) => links,
        Err(e) => return traversal.abort(e.into()),
    };

    traversal.advance(TraversalState::Expanding);
    traversal.pages_fetched += 1;

    let child_depth = depth - 1;
    let pending: Vec<PendingChild> = links
        .into_iter()
        .map(|link| {
            if child_depth > 0 {
                let handle = spawn_traversal(
                    Arc::clone(&context),
                    PageNode::new(link.clone()),
                    child_depth,
                );
                PendingChild::Spawned(link, handle)
            } else {
                PendingChild::Leaf(PageNode::new(link))
            }
        })
        .collect();

    for child in pending {
        match child {
            PendingChild::Leaf(node) => traversal.node.push_child(node),
            PendingChild::Spawned(link, handle) => match handle.await {
                Ok(child) => traversal.absorb(child),
                Err(e) => {
                    tracing::error!("Traversal of {} panicked: {}", link, e);
                    traversal.failures.push(task_failure(&link, &e));
                    traversal.node.push_child(PageNode::new(link));
                }
            },
        }
    }

    traversal.advance(TraversalState::Done);
    traversal
}
