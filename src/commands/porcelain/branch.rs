use crate::areas::refs::RefTarget;
use crate::areas::repository::Repository;
use crate::artifacts::revision;
use std::io::Write;

impl Repository {
    /// List branches (marking the current one) or create one at HEAD.
    pub fn branch(&mut self, name: Option<&str>) -> anyhow::Result<()> {
        let Some(name) = name else {
            return self.list_branches();
        };

        let oid = revision::resolve_oid(self.refs(), "@")?;
        self.refs()
            .update(&format!("refs/heads/{name}"), &RefTarget::Direct(oid), true)?;

        writeln!(self.writer(), "new branch {name} created at HEAD")?;
        Ok(())
    }

    fn list_branches(&mut self) -> anyhow::Result<()> {
        let current = self.current_branch()?;

        for (ref_name, _) in self.refs().iter_refs("heads", true)? {
            let Some(path) = ref_name.strip_prefix("refs/heads/") else {
                continue;
            };
            let branch = path.rsplit('/').next().unwrap_or(path);

            if Some(branch) == current.as_deref() {
                writeln!(self.writer(), "* {branch}")?;
            } else {
                writeln!(self.writer(), "{branch}")?;
            }
        }

        Ok(())
    }
}
