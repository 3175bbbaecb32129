use crate::areas::repository::Repository;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::FlatTree;
use anyhow::Context;
use std::path::Path;
use walkdir::WalkDir;

impl Repository {
    /// Stage files or directories. Directory arguments are walked
    /// recursively; ignored paths are skipped silently.
    pub fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        self.index().with_index(|index| {
            for path in paths {
                let full_path = self
                    .path()
                    .join(path)
                    .canonicalize()
                    .with_context(|| format!("failed to stat {path}"))?;

                if full_path.is_dir() {
                    for entry in WalkDir::new(&full_path) {
                        let entry = entry.context("failed to walk directory")?;
                        if entry.file_type().is_file() {
                            self.stage_file(index, entry.path())?;
                        }
                    }
                } else {
                    self.stage_file(index, &full_path)?;
                }
            }
            Ok(())
        })
    }

    fn stage_file(&self, index: &mut FlatTree, full_path: &Path) -> anyhow::Result<()> {
        let relative = full_path
            .strip_prefix(self.path())
            .context("file outside the working directory")?
            .to_string_lossy()
            .to_string();

        if self.workspace().is_ignored(&relative) {
            return Ok(());
        }

        let data = std::fs::read(full_path)
            .with_context(|| format!("failed to read file {relative}"))?;
        let oid = self.database().hash_object(&data, ObjectType::Blob)?;
        index.insert(relative, oid);

        Ok(())
    }
}
