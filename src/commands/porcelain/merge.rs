use crate::areas::refs::{HEAD, MERGE_HEAD, RefTarget};
use crate::areas::repository::Repository;
use crate::artifacts::merge;
use crate::artifacts::revision;
use crate::artifacts::trees;
use crate::errors::GogitError;
use std::io::Write;

impl Repository {
    /// Merge a target commit into HEAD.
    ///
    /// When HEAD is already an ancestor of the target, the tip simply
    /// advances (fast-forward, no merge commit). Otherwise the tree triple
    /// is three-way merged into the index and working directory and
    /// `MERGE_HEAD` is left pointing at the target so the next `commit`
    /// records both parents.
    pub fn merge(&mut self, name: &str) -> anyhow::Result<()> {
        let head_oid = self
            .refs()
            .read_oid(HEAD)?
            .ok_or_else(|| GogitError::NotFound("ref HEAD".to_string()))?;

        let target_oid = revision::resolve_oid(self.refs(), name)?;
        let target_commit = self.database().get_commit(&target_oid)?;
        let base_oid = merge::merge_base(self.database(), &target_oid, &head_oid)?;

        if base_oid == head_oid {
            trees::read_tree_into_index(self, target_commit.tree_oid(), true)?;
            self.refs().update(HEAD, &RefTarget::Direct(target_oid), true)?;

            writeln!(self.writer(), "fast-forward merge")?;
            return Ok(());
        }

        let head_commit = self.database().get_commit(&head_oid)?;
        let base_commit = self.database().get_commit(&base_oid)?;

        self.refs()
            .update(MERGE_HEAD, &RefTarget::Direct(target_oid), true)?;
        trees::read_tree_merged(
            self,
            base_commit.tree_oid(),
            head_commit.tree_oid(),
            target_commit.tree_oid(),
            true,
        )?;

        writeln!(self.writer(), "Merged in working tree. Please commit")?;
        Ok(())
    }
}
