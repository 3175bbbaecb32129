use crate::areas::refs::RefTarget;
use crate::areas::repository::Repository;
use crate::artifacts::log::rev_walk::RevWalk;
use std::io::Write;

impl Repository {
    /// Emit a Graphviz digraph of the refs and the commit DAG they reach.
    pub fn k(&mut self) -> anyhow::Result<()> {
        let mut dot = String::from("digraph commits {\n");

        let mut roots = Vec::new();
        for (name, target) in self.refs().iter_refs("", false)? {
            dot.push_str(&format!("\"{name}\" [shape=note]\n"));
            match target {
                RefTarget::Symbolic(value) => {
                    dot.push_str(&format!("\"{name}\" -> \"{value}\"\n"));
                }
                RefTarget::Direct(oid) => {
                    dot.push_str(&format!("\"{name}\" -> \"{oid}\"\n"));
                    roots.push(oid);
                }
            }
        }

        for oid in RevWalk::new(self.database(), roots) {
            let oid = oid?;
            let commit = self.database().get_commit(&oid)?;

            dot.push_str(&format!(
                "\"{oid}\" [shape=box style=filled label=\"{}\"]\n",
                oid.to_short_oid()
            ));
            for parent in commit.parent_oids() {
                dot.push_str(&format!("\"{oid}\" -> \"{parent}\"\n"));
            }
        }

        dot.push('}');
        writeln!(self.writer(), "{dot}")?;
        Ok(())
    }
}
