use crate::areas::refs::{HEAD, RefTarget};
use crate::areas::repository::Repository;
use crate::artifacts::revision;
use std::io::Write;

impl Repository {
    /// Move HEAD (through the current branch when on one) to an oid.
    pub fn reset(&mut self, name: &str) -> anyhow::Result<()> {
        let oid = revision::resolve_oid(self.refs(), name)?;
        self.refs().update(HEAD, &RefTarget::Direct(oid.clone()), true)?;

        writeln!(self.writer(), "{oid}")?;
        Ok(())
    }
}
