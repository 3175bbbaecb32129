use crate::areas::refs::RefTarget;
use crate::areas::repository::Repository;
use crate::artifacts::revision;
use std::io::Write;

impl Repository {
    pub fn tag(&mut self, name: &str, target: &str) -> anyhow::Result<()> {
        let oid = revision::resolve_oid(self.refs(), target)?;
        self.refs()
            .update(&format!("refs/tags/{name}"), &RefTarget::Direct(oid), true)?;

        writeln!(self.writer(), "{name}")?;
        Ok(())
    }
}
