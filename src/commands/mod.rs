//! Command implementations
//!
//! All CLI operations, organized into two categories:
//!
//! - `plumbing`: low-level object and maintenance operations (cat-file,
//!   read-index, gc, k)
//! - `porcelain`: user-facing version control workflows (add, commit, log,
//!   checkout, merge, rebase, push, ...)
//!
//! Each file carries one `impl Repository` block; output flows through the
//! repository's writer so tests can capture it.

pub mod plumbing;
pub mod porcelain;
