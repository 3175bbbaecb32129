use crate::areas::refs::{HEAD, RefTarget};
use crate::areas::repository::Repository;
use crate::artifacts::merge;
use crate::artifacts::revision;
use crate::artifacts::trees;
use crate::errors::GogitError;
use std::io::Write;

impl Repository {
    /// Replay the commits only HEAD can reach on top of the target.
    ///
    /// HEAD moves to the target first; each replayed commit is then
    /// three-way merged (merge base's tree, current HEAD's tree, its own
    /// tree) into the index and working directory and re-committed with
    /// its original message and timestamp. Replayed commits are always
    /// single-parent; merges are deliberately not preserved as merges.
    pub fn rebase(&mut self, name: &str) -> anyhow::Result<()> {
        let head_oid = self
            .refs()
            .read_oid(HEAD)?
            .ok_or_else(|| GogitError::NotFound("ref HEAD".to_string()))?;

        let target_oid = revision::resolve_oid(self.refs(), name)?;
        let base_oid = merge::merge_base(self.database(), &target_oid, &head_oid)?;
        let base_commit = self.database().get_commit(&base_oid)?;

        let to_replay = merge::rebase_commits(self.database(), &target_oid, &head_oid)?;

        self.refs()
            .update(HEAD, &RefTarget::Direct(target_oid.clone()), true)?;

        for oid in to_replay {
            let commit = self.database().get_commit(&oid)?;

            let current_oid = self
                .refs()
                .read_oid(HEAD)?
                .ok_or_else(|| GogitError::NotFound("ref HEAD".to_string()))?;
            let current_commit = self.database().get_commit(&current_oid)?;

            trees::read_tree_merged(
                self,
                base_commit.tree_oid(),
                current_commit.tree_oid(),
                commit.tree_oid(),
                true,
            )?;
            self.create_commit(commit.message(), commit.timestamp())?;
        }

        writeln!(self.writer(), "rebased off {target_oid}")?;
        Ok(())
    }
}
