use crate::areas::repository::Repository;
use crate::artifacts::diff;
use crate::artifacts::revision;
use crate::artifacts::trees;
use crate::errors::GogitError;

impl Repository {
    /// Diff tree combinations:
    ///
    /// - no commit, no `--cached`: index vs working directory
    /// - no commit, `--cached`: HEAD's tree vs index
    /// - commit, no `--cached`: commit tree vs working directory
    /// - commit, `--cached`: commit tree vs index
    pub fn diff(&mut self, commit: Option<&str>, cached: bool) -> anyhow::Result<()> {
        let mut tree_from = match commit {
            Some(name) => {
                let oid = revision::resolve_oid(self.refs(), name)?;
                let commit = self.database().get_commit(&oid)?;
                Some(trees::read_tree(self.database(), Some(commit.tree_oid()), "")?)
            }
            None => None,
        };

        let tree_to = if cached {
            if tree_from.is_none() {
                tree_from = match revision::resolve_oid(self.refs(), "@") {
                    Ok(oid) => {
                        let commit = self.database().get_commit(&oid)?;
                        Some(trees::read_tree(self.database(), Some(commit.tree_oid()), "")?)
                    }
                    Err(err) if GogitError::is_no_oid_found(&err) => None,
                    Err(err) => return Err(err),
                };
            }
            self.index().load()?.unwrap_or_default()
        } else {
            if tree_from.is_none() {
                tree_from = Some(self.index().load()?.unwrap_or_default());
            }
            self.workspace().working_tree(self.database())?
        };

        let tree_from = tree_from.unwrap_or_default();
        let output = diff::diff_trees(self.database(), &tree_from, &tree_to)?;
        self.print_diff(&output)
    }
}
