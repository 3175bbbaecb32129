use crate::areas::refs::{DEFAULT_BRANCH_REF, HEAD, RefTarget};
use crate::areas::repository::Repository;
use anyhow::Context;
use std::io::Write;

const SKELETON_DIRS: [&str; 3] = ["objects", "refs/heads", "refs/tags"];

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        // refuse to re-initialize an existing repository
        std::fs::create_dir(self.repo_path()).context(format!(
            "failed to create repository at {}",
            self.repo_path().display()
        ))?;

        for dir in SKELETON_DIRS {
            std::fs::create_dir_all(self.repo_path().join(dir))
                .context(format!("failed to create repository directory {dir}"))?;
        }

        self.refs().update(
            HEAD,
            &RefTarget::Symbolic(DEFAULT_BRANCH_REF.to_string()),
            true,
        )?;

        writeln!(
            self.writer(),
            "Initialized empty gogit repository in {}",
            self.repo_path().display()
        )?;
        Ok(())
    }
}
