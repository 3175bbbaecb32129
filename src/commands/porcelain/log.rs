use crate::areas::refs::RefTarget;
use crate::areas::repository::Repository;
use crate::artifacts::log::rev_walk::RevWalk;
use crate::artifacts::objects::commit::CommitObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::revision;
use crate::errors::GogitError;
use std::collections::HashMap;
use std::io::Write;

impl Repository {
    pub fn log(&mut self, name: Option<&str>) -> anyhow::Result<()> {
        let name = name.unwrap_or("@");
        let root = match revision::resolve_oid(self.refs(), name) {
            Ok(oid) => oid,
            // an empty repository has no history to print
            Err(err) if name == "@" && GogitError::is_no_oid_found(&err) => return Ok(()),
            Err(err) => return Err(err),
        };

        let mut decorations: HashMap<ObjectId, Vec<String>> = HashMap::new();
        for (ref_name, target) in self.refs().iter_refs("", true)? {
            if let RefTarget::Direct(oid) = target {
                decorations.entry(oid).or_default().push(ref_name);
            }
        }

        for oid in RevWalk::new(self.database(), vec![root]) {
            let oid = oid?;
            let commit = self.database().get_commit(&oid)?;
            let refs = decorations.get(&oid).map(Vec::as_slice).unwrap_or(&[]);
            self.print_commit(&oid, &commit, refs)?;
        }

        Ok(())
    }

    pub(crate) fn print_commit(
        &self,
        oid: &ObjectId,
        commit: &CommitObject,
        refs: &[String],
    ) -> anyhow::Result<()> {
        let decoration = if refs.is_empty() {
            String::new()
        } else {
            format!(" <- ({})", refs.join(", "))
        };

        writeln!(self.writer(), "commit: {oid}{decoration}")?;
        writeln!(self.writer(), "message: \"{}\"\n", commit.message())?;
        Ok(())
    }
}
