//! Working directory operations
//!
//! The workspace walks, snapshots, empties, and repopulates the working
//! directory. Paths are working-relative with forward-slash separators. A
//! `.gogitignore` file at the working root lists one substring per line;
//! any path containing one of those substrings is ignored, and the repo
//! directory itself always is.

use crate::areas::database::Database;
use crate::areas::repository::GOGIT_DIR;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::FlatTree;
use anyhow::Context;
use std::path::Path;
use walkdir::WalkDir;

const IGNORE_FILE: &str = ".gogitignore";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Substring match against `.gogitignore`; the repo dir always matches.
    pub fn is_ignored(&self, path: &str) -> bool {
        if path.contains(GOGIT_DIR) {
            return true;
        }

        let patterns = std::fs::read_to_string(self.path.join(IGNORE_FILE)).unwrap_or_default();
        patterns
            .lines()
            .any(|pattern| !pattern.is_empty() && path.contains(pattern))
    }

    /// List every non-ignored file, working-relative.
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(self.path.as_ref()) {
            let entry = entry.context("failed to walk working directory")?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(self.path.as_ref())
                .context("file outside the working directory")?
                .to_string_lossy()
                .to_string();
            if !self.is_ignored(&relative) {
                files.push(relative);
            }
        }

        Ok(files)
    }

    /// Snapshot the working directory as a `path → blob oid` map.
    ///
    /// Every file seen is hashed through the database, so new blobs are
    /// persisted as a side effect; this makes a subsequent `add` of an
    /// unchanged file a pure index update.
    pub fn working_tree(&self, database: &Database) -> anyhow::Result<FlatTree> {
        let mut tree = FlatTree::new();

        for path in self.list_files()? {
            let data = std::fs::read(self.path.join(&path))
                .with_context(|| format!("failed to read file {path}"))?;
            let oid = database.hash_object(&data, ObjectType::Blob)?;
            tree.insert(path, oid);
        }

        Ok(tree)
    }

    /// Delete everything in the working directory except ignored paths and
    /// the repo directory. Entries that vanish mid-walk (their parent was
    /// removed first) are skipped.
    pub fn empty_working_dir(&self) -> anyhow::Result<()> {
        for entry in WalkDir::new(self.path.as_ref())
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
        {
            let Ok(relative) = entry.path().strip_prefix(self.path.as_ref()) else {
                continue;
            };
            if self.is_ignored(&relative.to_string_lossy()) {
                continue;
            }

            let _ = if entry.file_type().is_dir() {
                std::fs::remove_dir_all(entry.path())
            } else {
                std::fs::remove_file(entry.path())
            };
        }

        Ok(())
    }

    /// Empty the working directory, then materialize every blob in the map.
    pub fn checkout_index(&self, database: &Database, index: &FlatTree) -> anyhow::Result<()> {
        self.empty_working_dir()?;

        for (path, oid) in index {
            let file_path = self.path.join(path);
            if let Some(parent) = file_path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create directory for {path}"))?;
            }

            let blob = database.get_typed_object(oid, ObjectType::Blob)?;
            std::fs::write(&file_path, &blob)
                .with_context(|| format!("failed to write file {path}"))?;
        }

        Ok(())
    }
}
