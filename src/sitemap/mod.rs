//! Sitemap tree module
//!
//! The crawl builds a tree of `PageNode`s that mirrors how pages reference
//! each other. The tree owns its nodes outright: no shared references and
//! no back-pointers, so the same URL may appear in several branches.

mod node;

pub use node::{PageNode, Walk};
