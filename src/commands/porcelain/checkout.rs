use crate::areas::refs::{HEAD, RefTarget};
use crate::areas::repository::Repository;
use crate::artifacts::revision;
use crate::artifacts::trees;
use crate::errors::GogitError;
use std::io::Write;

impl Repository {
    /// Switch to a branch or oid, or create a branch with `-b`.
    ///
    /// A resolvable name materializes that commit's tree into the index and
    /// working directory. HEAD ends up symbolic for branch names (existing
    /// or newly created; a new branch ref itself is born on the next
    /// commit), and direct for anything else.
    pub fn checkout(&mut self, name: Option<&str>, new_branch: Option<&str>) -> anyhow::Result<()> {
        let (name, created) = match (new_branch, name) {
            (Some(branch), _) => (branch, true),
            (None, Some(name)) => (name, false),
            (None, None) => anyhow::bail!("not enough args, require -b or a branch name"),
        };

        if let Some(current) = self.current_branch()? {
            if current == name {
                writeln!(self.writer(), "Already on {name}")?;
                return Ok(());
            }
        }

        let oid = match revision::resolve_oid(self.refs(), name) {
            Ok(oid) => Some(oid),
            Err(err) if GogitError::is_no_oid_found(&err) => None,
            Err(err) => return Err(err),
        };

        if let Some(oid) = &oid {
            let commit = self.database().get_commit(oid)?;
            trees::read_tree_into_index(self, commit.tree_oid(), true)?;
        }

        let head_target = match &oid {
            Some(oid) if !self.is_branch(name) => RefTarget::Direct(oid.clone()),
            _ => RefTarget::Symbolic(format!("refs/heads/{name}")),
        };
        self.refs().update(HEAD, &head_target, false)?;

        let prefix = if created { " a new" } else { "" };
        writeln!(self.writer(), "Switched to{prefix} branch '{name}'")?;
        Ok(())
    }

    fn is_branch(&self, name: &str) -> bool {
        self.refs()
            .read_oid(&format!("refs/heads/{name}"))
            .ok()
            .flatten()
            .is_some()
    }

    /// Basename of the branch HEAD points at, or `None` when detached.
    pub(crate) fn current_branch(&self) -> anyhow::Result<Option<String>> {
        match self.refs().get(HEAD, false)? {
            Some(RefTarget::Symbolic(target)) => {
                let branch = target.rsplit('/').next().unwrap_or(target.as_str());
                Ok(Some(branch.to_string()))
            }
            _ => Ok(None),
        }
    }
}
