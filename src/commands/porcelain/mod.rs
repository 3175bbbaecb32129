//! Porcelain commands (user-facing operations)
//!
//! - `init`: initialize a repository, HEAD on `refs/heads/main`
//! - `add`: stage files or directories
//! - `commit`: record the index as a commit
//! - `log`: walk and print history with ref decorations
//! - `checkout`: switch or create branches, or detach at an oid
//! - `branch`: list or create branches
//! - `tag`: name a commit
//! - `status`: branch, in-progress merge, staged/unstaged changes
//! - `reset`: move HEAD
//! - `show`: print a commit and its diff against the first parent
//! - `diff`: diff working/index/commit tree combinations
//! - `merge`: fast-forward or three-way merge
//! - `rebase`: replay HEAD-only commits atop a new base
//! - `fetch` / `push`: synchronize with a sibling repository

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod fetch;
pub mod init;
pub mod log;
pub mod merge;
pub mod push;
pub mod rebase;
pub mod reset;
pub mod show;
pub mod status;
pub mod tag;
