//! Traversal state definitions for a single page node
//!
//! This module defines the states a traversal task can be in while it
//! fetches a page, extracts its links and expands its children.

use std::fmt;

/// Represents the current state of a node's traversal task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalState {
    // ===== Active States =====
    /// Task is registered with the completion barrier but has not started work
    Pending,

    /// Page is being fetched
    Fetching,

    /// Links are being extracted from the fetched page
    Extracting,

    /// Children are being attached and their traversals awaited
    Expanding,

    // ===== Terminal States =====
    /// Traversal finished; the node's child list is final
    Done,

    /// Fetch or extraction failed; the node keeps an empty child list
    Aborted,
}

impl TraversalState {
    /// Returns true if this is a terminal state (the child list is final)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Returns true if moving from `self` to `next` is a legal step
    ///
    /// `Pending` may skip straight to `Done` when the depth budget is zero.
    /// Only `Fetching` and `Extracting` may abort.
    pub fn can_transition_to(&self, next: TraversalState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Pending, Self::Done)
                | (Self::Fetching, Self::Extracting)
                | (Self::Fetching, Self::Aborted)
                | (Self::Extracting, Self::Expanding)
                | (Self::Extracting, Self::Aborted)
                | (Self::Expanding, Self::Done)
        )
    }

    /// Returns the lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Expanding => "expanding",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for TraversalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
