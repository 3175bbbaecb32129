//! Structured error kinds surfaced by the core
//!
//! Every operation returns `anyhow::Result`; these kinds are attached where
//! the caller's behavior branches on the failure (checkout tolerates an
//! unresolvable name, push maps the ancestry guard to a refusal). Plain
//! filesystem failures stay as wrapped `std::io::Error` values with context.

use crate::artifacts::objects::object_type::ObjectType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GogitError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("no oid found with ref: {0}")]
    NoOidFound(String),

    #[error("object is of type {received}, expected {expected}")]
    ObjectTypeMismatch {
        expected: ObjectType,
        received: ObjectType,
    },

    #[error("nothing to commit")]
    NothingToCommit,

    #[error("remote branch is not an ancestor of local")]
    NonFastForward,

    #[error("no common ancestor found for oids {left} and {right}")]
    NoCommonAncestor { left: String, right: String },

    #[error("{0}")]
    Parse(String),
}

impl GogitError {
    /// Check whether an error chain bottoms out in an unresolvable revision name.
    pub fn is_no_oid_found(err: &anyhow::Error) -> bool {
        matches!(err.downcast_ref::<GogitError>(), Some(GogitError::NoOidFound(_)))
    }
}
