use crate::areas::refs::{HEAD, MERGE_HEAD, RefTarget};
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::CommitObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::trees;
use std::io::Write;

/// Pins the commit clock to an RFC 3339 instant, for reproducible history.
pub const COMMIT_TIME_ENV: &str = "GOGIT_COMMIT_TIME";

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        if message.is_empty() {
            anyhow::bail!("commit message must not be empty");
        }

        let oid = self.create_commit(message, commit_timestamp()?)?;
        writeln!(self.writer(), "commit: {oid}")?;
        Ok(())
    }

    /// Record the index as a commit and advance HEAD (through the current
    /// branch when on one). An in-progress merge contributes `MERGE_HEAD`
    /// as the second parent and is concluded by removing that ref.
    pub fn create_commit(
        &self,
        message: &str,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> anyhow::Result<ObjectId> {
        let tree_oid = trees::write_tree(self.database(), self.index())?;

        let mut parents = Vec::new();
        if let Some(head_oid) = self.refs().read_oid(HEAD)? {
            parents.push(head_oid);
        }
        if let Some(merge_oid) = self.refs().read_oid(MERGE_HEAD)? {
            parents.push(merge_oid);
            self.refs().delete(MERGE_HEAD, false)?;
        }

        let commit = CommitObject::new(tree_oid, parents, timestamp, message.to_string());
        let oid = self
            .database()
            .hash_object(&commit.serialize(), ObjectType::Commit)?;

        self.refs().update(HEAD, &RefTarget::Direct(oid.clone()), true)?;
        Ok(oid)
    }
}

fn commit_timestamp() -> anyhow::Result<chrono::DateTime<chrono::FixedOffset>> {
    match std::env::var(COMMIT_TIME_ENV) {
        Ok(raw) => chrono::DateTime::parse_from_rfc3339(&raw)
            .map_err(|err| anyhow::anyhow!("invalid {COMMIT_TIME_ENV} value {raw}: {err}")),
        Err(_) => Ok(chrono::Local::now().fixed_offset()),
    }
}
