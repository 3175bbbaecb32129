//! Revision name resolution
//!
//! Maps a user-supplied name to an oid: `@` aliases `HEAD`, then the ref
//! namespaces are searched in order (the name verbatim, under `refs/`,
//! under `refs/tags/`, under `refs/heads/`), and finally a well-formed
//! 40-hex digest resolves to itself.

use crate::areas::refs::{HEAD, Refs};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GogitError;

/// Ref namespaces searched in order when resolving a name.
const REF_SEARCH_DIRS: [&str; 4] = ["", "refs", "refs/tags", "refs/heads"];

pub fn resolve_oid(refs: &Refs, name: &str) -> anyhow::Result<ObjectId> {
    let name = if name == "@" { HEAD } else { name };

    for dir in REF_SEARCH_DIRS {
        let ref_name = if dir.is_empty() {
            name.to_string()
        } else {
            format!("{dir}/{name}")
        };

        if refs.get(&ref_name, false)?.is_some() {
            if let Some(oid) = refs.read_oid(&ref_name)? {
                return Ok(oid);
            }
        }
    }

    if ObjectId::is_valid(name) {
        return ObjectId::try_parse(name.to_string());
    }

    Err(GogitError::NoOidFound(name.to_string()).into())
}
