//! Data structures and history algorithms
//!
//! - `diff`: tree comparison, change classification, external diff drivers
//! - `log`: commit graph traversal and reachability closure
//! - `merge`: merge base discovery and three-way tree merging
//! - `objects`: object types (blob payloads, tree and commit codecs)
//! - `remote`: push/fetch between repositories on the same filesystem
//! - `revision`: user-facing name to oid resolution
//! - `trees`: tree construction from the index and tree materialization

pub mod diff;
pub mod log;
pub mod merge;
pub mod objects;
pub mod remote;
pub mod revision;
pub mod trees;
