//! Staging index
//!
//! The index is a flat JSON object mapping working-relative paths (forward
//! slashes) to blob oids, stored at `<repo>/index`. All mutations flow
//! through the scoped guard, which loads a snapshot, hands a copy to the
//! mutator, and writes back at most once, only when the mutator succeeded
//! and actually changed the map. Read-only callers therefore never create
//! or touch the file.

use crate::artifacts::objects::tree::FlatTree;
use anyhow::Context;
use derive_new::new;
use std::path::Path;

#[derive(Debug, new)]
pub struct Index {
    /// Path to the index file (typically `.gogit/index`)
    path: Box<Path>,
}

impl Index {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index, or `None` when no index file exists yet.
    pub fn load(&self) -> anyhow::Result<Option<FlatTree>> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(anyhow::Error::new(err)
                    .context(format!("failed to read index file {}", self.path.display())));
            }
        };

        if data.is_empty() {
            return Ok(Some(FlatTree::new()));
        }

        serde_json::from_slice(&data)
            .context("failed to parse index file")
            .map(Some)
    }

    /// Run a mutator against a snapshot of the index.
    ///
    /// The mutator sees a copy; the pre-state survives a failure untouched,
    /// and an unchanged result map produces no write at all.
    pub fn with_index<T>(
        &self,
        mutator: impl FnOnce(&mut FlatTree) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let loaded = self.load()?.unwrap_or_default();

        let mut working = loaded.clone();
        let outcome = mutator(&mut working)?;

        if working != loaded {
            let json = serde_json::to_vec(&working).context("failed to serialize index")?;
            std::fs::write(&self.path, json)
                .with_context(|| format!("failed to write index file {}", self.path.display()))?;
        }

        Ok(outcome)
    }
}
