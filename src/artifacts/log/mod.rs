//! Commit history traversal
//!
//! - `rev_walk`: first-parent-first walk over the commit DAG, plus the
//!   reachable-object closure used by garbage collection and remote sync

pub mod rev_walk;
