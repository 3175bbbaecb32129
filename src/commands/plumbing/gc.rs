use crate::areas::refs::RefTarget;
use crate::areas::repository::Repository;
use crate::artifacts::log::rev_walk;
use std::io::Write;

impl Repository {
    /// Delete every object unreachable from the refs.
    ///
    /// Roots are the dereferenced values of all refs (HEAD and MERGE_HEAD
    /// included, so a detached checkout stays alive); the closure covers
    /// each commit, its tree, and everything below.
    pub fn gc(&mut self) -> anyhow::Result<()> {
        let mut roots = Vec::new();
        for (_, target) in self.refs().iter_refs("", true)? {
            if let RefTarget::Direct(oid) = target {
                roots.push(oid);
            }
        }

        let reachable = rev_walk::objects_in_commits(self.database(), roots)?;

        let mut removed = 0usize;
        for oid in self.database().list_objects()? {
            if !reachable.contains(&oid) {
                self.database().delete_object(&oid)?;
                removed += 1;
            }
        }

        writeln!(self.writer(), "Removed {removed} unreachable objects")?;
        Ok(())
    }
}
