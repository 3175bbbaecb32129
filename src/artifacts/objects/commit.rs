//! Commit object codec
//!
//! A commit payload is a block of `<key> <value>` header lines:
//!
//! ```text
//! tree <oid>
//! time <rfc3339>
//! parent <oid>
//! message <single line>
//! ```
//!
//! Exactly one `tree`, exactly one `time`, zero or more ordered `parent`
//! lines (the first parent is the mainline), and exactly one `message` as
//! the last line. Serialization is deterministic so identical commits hash
//! identically.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GogitError;
use bytes::Bytes;
use derive_new::new;

/// A snapshot of the repository plus its position in history.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CommitObject {
    /// Tree object describing the directory snapshot
    tree_oid: ObjectId,
    /// Parent commits; empty for a root commit, two for a merge
    parent_oids: Vec<ObjectId>,
    /// Commit timestamp
    timestamp: chrono::DateTime<chrono::FixedOffset>,
    /// Single-line commit message
    message: String,
}

impl CommitObject {
    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent_oids(&self) -> &[ObjectId] {
        &self.parent_oids
    }

    /// The mainline parent, if any.
    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parent_oids.first()
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn serialize(&self) -> Bytes {
        let mut lines = Vec::new();

        lines.push(format!("tree {}", self.tree_oid));
        lines.push(format!("time {}", self.timestamp.to_rfc3339()));
        for parent in &self.parent_oids {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("message {}", self.message));

        Bytes::from(lines.join("\n"))
    }

    pub fn parse(payload: &[u8]) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(payload)
            .map_err(|_| GogitError::Parse("commit payload is not valid utf-8".to_string()))?;

        let mut tree_oid = None;
        let mut parent_oids = Vec::new();
        let mut timestamp = None;
        let mut message = None;

        for line in content.lines() {
            // tolerate whitespace-only lines between headers
            let Some((key, value)) = line.split_once(' ') else {
                continue;
            };

            match key {
                "tree" => tree_oid = Some(ObjectId::try_parse(value.to_string())?),
                "parent" => parent_oids.push(ObjectId::try_parse(value.to_string())?),
                "time" => {
                    let parsed = chrono::DateTime::parse_from_rfc3339(value).map_err(|err| {
                        GogitError::Parse(format!("invalid commit timestamp {value}: {err}"))
                    })?;
                    timestamp = Some(parsed);
                }
                "message" => message = Some(value.to_string()),
                other => {
                    return Err(GogitError::Parse(format!("unknown commit key {other}")).into());
                }
            }
        }

        let tree_oid =
            tree_oid.ok_or_else(|| GogitError::Parse("commit is missing a tree line".to_string()))?;
        let timestamp = timestamp
            .ok_or_else(|| GogitError::Parse("commit is missing a time line".to_string()))?;
        let message = message
            .ok_or_else(|| GogitError::Parse("commit is missing a message line".to_string()))?;

        Ok(CommitObject::new(tree_oid, parent_oids, timestamp, message))
    }
}
