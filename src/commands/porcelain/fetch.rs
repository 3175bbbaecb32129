use crate::areas::repository::Repository;
use crate::artifacts::remote;
use std::io::Write;

impl Repository {
    pub fn fetch(&mut self, path: &str) -> anyhow::Result<()> {
        let remote_path = remote::normalize_remote_path(path)?;
        remote::fetch(self, &remote_path)?;

        writeln!(self.writer(), "fetched {}", remote_path.display())?;
        Ok(())
    }
}
