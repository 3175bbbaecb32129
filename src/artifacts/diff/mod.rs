//! Tree comparison and change classification
//!
//! Comparison works on flattened trees: the union of paths is visited in
//! case-insensitive lexicographic order (paths differing only in case
//! collide, an inherited limitation on case-sensitive filesystems), and
//! per-path oids decide whether a file is new, deleted, or modified.
//! Content-level output comes from the external drivers in `driver`.

pub mod driver;

use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::FlatTree;
use colored::Colorize;
use std::collections::HashMap;

/// How a path changed between two trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ChangeKind::Added => "new file",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Modified => "modified",
        };
        write!(f, "{label}")
    }
}

/// Visit the union of paths across any number of trees; per path, the oid
/// slot for a tree missing the path is `None`.
pub fn compare_trees(trees: &[&FlatTree]) -> Vec<(String, Vec<Option<ObjectId>>)> {
    let mut entries: HashMap<String, Vec<Option<ObjectId>>> = HashMap::new();

    for (slot, tree) in trees.iter().enumerate() {
        for (path, oid) in tree.iter() {
            entries
                .entry(path.clone())
                .or_insert_with(|| vec![None; trees.len()])[slot] = Some(oid.clone());
        }
    }

    let mut paths = entries.keys().cloned().collect::<Vec<_>>();
    paths.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });

    paths
        .into_iter()
        .filter_map(|path| entries.remove(&path).map(|oids| (path, oids)))
        .collect()
}

/// Classify the paths that differ between two trees, skipping equal pairs.
pub fn changed_files(from: &FlatTree, to: &FlatTree) -> Vec<(String, ChangeKind)> {
    compare_trees(&[from, to])
        .into_iter()
        .filter_map(|(path, oids)| {
            let (from_oid, to_oid) = (&oids[0], &oids[1]);
            if from_oid == to_oid {
                return None;
            }

            let kind = match (from_oid, to_oid) {
                (None, Some(_)) => ChangeKind::Added,
                (Some(_), None) => ChangeKind::Deleted,
                _ => ChangeKind::Modified,
            };
            Some((path, kind))
        })
        .collect()
}

/// Concatenated unified diffs of every changed blob pair.
pub fn diff_trees(database: &Database, from: &FlatTree, to: &FlatTree) -> anyhow::Result<Vec<u8>> {
    let mut output = Vec::new();

    for (path, oids) in compare_trees(&[from, to]) {
        if oids[0] == oids[1] {
            continue;
        }
        let difference = driver::diff_blobs(database, &path, oids[0].as_ref(), oids[1].as_ref())?;
        output.extend_from_slice(&difference);
    }

    Ok(output)
}

/// Paint a diff or status line for terminal output; blank lines drop out.
pub fn paint_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let painted = if trimmed.starts_with('+') || trimmed.starts_with("new file") {
        line.green().to_string()
    } else if trimmed.starts_with('-')
        || trimmed.starts_with("deleted")
        || trimmed.starts_with("modified")
    {
        line.red().to_string()
    } else {
        line.normal().to_string()
    };
    Some(painted)
}
