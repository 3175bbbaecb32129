use crate::areas::repository::Repository;
use crate::artifacts::remote;
use std::io::Write;

impl Repository {
    pub fn push(&mut self, path: &str, ref_name: &str) -> anyhow::Result<()> {
        let remote_path = remote::normalize_remote_path(path)?;
        remote::push(self, &remote_path, ref_name)?;

        writeln!(self.writer(), "pushed {ref_name} to {}", remote_path.display())?;
        Ok(())
    }
}
