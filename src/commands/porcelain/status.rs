use crate::areas::refs::{MERGE_HEAD, RefTarget};
use crate::areas::repository::Repository;
use crate::artifacts::diff;
use crate::artifacts::objects::tree::FlatTree;
use crate::artifacts::revision;
use crate::artifacts::trees;
use crate::errors::GogitError;
use std::io::Write;

impl Repository {
    pub fn status(&mut self) -> anyhow::Result<()> {
        let head_oid = match revision::resolve_oid(self.refs(), "@") {
            Ok(oid) => Some(oid),
            Err(err) if GogitError::is_no_oid_found(&err) => None,
            Err(err) => return Err(err),
        };

        match self.current_branch()? {
            Some(branch) => writeln!(self.writer(), "On branch {branch}")?,
            None => {
                let short = head_oid
                    .as_ref()
                    .map(|oid| oid.to_short_oid())
                    .unwrap_or_default();
                writeln!(self.writer(), "HEAD detached at {short}")?;
            }
        }

        if let Some(RefTarget::Direct(merge_oid)) = self.refs().get(MERGE_HEAD, true)? {
            writeln!(self.writer(), "Merging with {}", merge_oid.to_short_oid())?;
        }

        let head_tree = match &head_oid {
            Some(oid) => {
                let commit = self.database().get_commit(oid)?;
                trees::read_tree(self.database(), Some(commit.tree_oid()), "")?
            }
            None => FlatTree::new(),
        };
        let index_tree = self.index().load()?.unwrap_or_default();
        let working_tree = self.workspace().working_tree(self.database())?;

        writeln!(self.writer(), "\nChanges to be committed:")?;
        self.print_changes(&head_tree, &index_tree)?;

        writeln!(self.writer(), "\nChanges not staged for commit:")?;
        self.print_changes(&index_tree, &working_tree)?;

        Ok(())
    }

    fn print_changes(&self, from: &FlatTree, to: &FlatTree) -> anyhow::Result<()> {
        for (path, kind) in diff::changed_files(from, to) {
            if let Some(line) = diff::paint_line(&format!("{kind}: {path}")) {
                writeln!(self.writer(), "{line}")?;
            }
        }
        Ok(())
    }
}
