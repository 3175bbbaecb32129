use crate::areas::repository::Repository;
use crate::artifacts::trees::{self, IndexNode};
use crate::errors::GogitError;
use std::collections::BTreeMap;
use std::io::Write;

impl Repository {
    /// Pretty-print the index as a nested directory listing.
    pub fn read_index(&mut self) -> anyhow::Result<()> {
        let Some(index) = self.index().load()? else {
            return Err(GogitError::NothingToCommit.into());
        };

        let structured = trees::structured_index(&index);
        self.print_index_level(&structured, 0)
    }

    fn print_index_level(
        &self,
        level: &BTreeMap<String, IndexNode>,
        depth: usize,
    ) -> anyhow::Result<()> {
        for (name, node) in level {
            match node {
                IndexNode::Dir(children) => {
                    writeln!(self.writer(), "{}dir: {name}", "-> ".repeat(depth))?;
                    self.print_index_level(children, depth + 1)?;
                }
                IndexNode::Leaf(oid) => {
                    writeln!(self.writer(), "{}{name} {oid}", "  ".repeat(depth + 1))?;
                }
            }
        }
        Ok(())
    }
}
