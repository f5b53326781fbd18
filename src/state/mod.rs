//! State module for tracking traversal progress
//!
//! Each page node is expanded by exactly one traversal task. `TraversalState`
//! names the steps that task moves through, from `Pending` to either `Done`
//! or `Aborted`.

mod traversal_state;

pub use traversal_state::TraversalState;
