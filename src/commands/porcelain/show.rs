use crate::areas::repository::Repository;
use crate::artifacts::objects::tree::FlatTree;
use crate::artifacts::revision;
use crate::artifacts::trees;
use crate::artifacts::diff;
use std::io::Write;

impl Repository {
    /// Print a commit and its diff against the first parent.
    pub fn show(&mut self, name: &str) -> anyhow::Result<()> {
        let oid = revision::resolve_oid(self.refs(), name)?;
        let commit = self.database().get_commit(&oid)?;

        let parent_tree = match commit.first_parent() {
            Some(parent) => {
                let parent_commit = self.database().get_commit(parent)?;
                trees::read_tree(self.database(), Some(parent_commit.tree_oid()), "")?
            }
            None => FlatTree::new(),
        };

        self.print_commit(&oid, &commit, &[])?;

        let tree = trees::read_tree(self.database(), Some(commit.tree_oid()), "")?;
        let output = diff::diff_trees(self.database(), &parent_tree, &tree)?;
        self.print_diff(&output)
    }

    pub(crate) fn print_diff(&self, output: &[u8]) -> anyhow::Result<()> {
        for line in String::from_utf8_lossy(output).lines() {
            if let Some(painted) = diff::paint_line(line) {
                writeln!(self.writer(), "{painted}")?;
            }
        }
        Ok(())
    }
}
