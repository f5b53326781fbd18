use crate::url::Link;
use url::Url;

/// One crawled (or to-be-crawled) page and the links found on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNode {
    link: Link,
    children: Vec<PageNode>,
}

impl PageNode {
    /// Creates a node with no children
    pub fn new(link: impl Into<Link>) -> Self {
        Self {
            link: link.into(),
            children: Vec::new(),
        }
    }

    /// The page's parsed absolute URL
    pub fn url(&self) -> &Url {
        self.link.url()
    }

    /// The page's URL as it is written in the sitemap
    pub fn as_str(&self) -> &str {
        self.link.as_str()
    }

    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Child nodes in the order their links were discovered
    pub fn children(&self) -> &[PageNode] {
        &self.children
    }

    /// Appends a child after any existing children
    pub fn push_child(&mut self, child: PageNode) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(PageNode::node_count).sum::<usize>()
    }

    /// Number of edges on the longest path from `self` down to a leaf
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Pre-order walk of this subtree yielding `(depth, node)` pairs
    ///
    /// `self` is yielded first at depth 0. Each child's whole subtree is
    /// yielded before its next sibling.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }
}

/// Pre-order iterator returned by [`PageNode::walk`]
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a PageNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a PageNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}
