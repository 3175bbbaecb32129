//! Tree object codec and the flat path map
//!
//! A tree payload is one entry per line, `"<name> <oid> <type>"`, where the
//! type is `blob` or `tree`. Entries are sorted by name at write time so
//! identical logical trees hash identically. Parsing stops at the first
//! line with fewer than three fields, which tolerates the trailing newline.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;

/// Flattened tree: working-relative path (forward slashes) to blob oid.
///
/// The same shape serves as the staging index, the decoded form of a tree
/// object, and the snapshot of the working directory.
pub type FlatTree = BTreeMap<String, ObjectId>;

/// One line of a tree object.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub name: String,
    pub oid: ObjectId,
    pub entry_type: ObjectType,
}

/// Serialize entries into a tree payload, sorted by name.
pub fn serialize_entries(entries: &[TreeEntry]) -> Bytes {
    let mut entries = entries.to_vec();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let mut payload = String::new();
    for entry in &entries {
        payload.push_str(&format!("{} {} {}\n", entry.name, entry.oid, entry.entry_type));
    }

    Bytes::from(payload)
}

pub fn parse_entries(payload: &[u8]) -> anyhow::Result<Vec<TreeEntry>> {
    let content = std::str::from_utf8(payload)
        .map_err(|_| crate::errors::GogitError::Parse("tree payload is not valid utf-8".to_string()))?;

    let mut entries = Vec::new();
    for line in content.split('\n') {
        let fields = line.split(' ').collect::<Vec<_>>();
        if fields.len() < 3 {
            break;
        }

        entries.push(TreeEntry::new(
            fields[0].to_string(),
            ObjectId::try_parse(fields[1].to_string())?,
            ObjectType::try_from(fields[2])?,
        ));
    }

    Ok(entries)
}
