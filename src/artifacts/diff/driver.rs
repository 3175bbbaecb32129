//! External diff and merge drivers
//!
//! Blob contents are written to scratch files and handed to the system
//! `diff` (unified output) or `diff3 -m` (three-way merge) utilities. A
//! missing side becomes an empty scratch file, which makes additions and
//! deletions fall out of the same code path. Both tools exit 1 when the
//! inputs differ or conflict, so only exit codes above 1 are failures.

use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::io::Write;
use std::process::Output;
use tempfile::NamedTempFile;

/// Write a blob (or nothing, for a missing side) to a scratch file.
fn write_scratch_blob(database: &Database, oid: Option<&ObjectId>) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to create scratch file for diff")?;

    if let Some(oid) = oid {
        let blob = database.get_typed_object(oid, ObjectType::Blob)?;
        file.write_all(&blob)
            .context("failed to write scratch file for diff")?;
        file.flush().context("failed to flush scratch file for diff")?;
    }

    Ok(file)
}

fn ensure_tool_succeeded(output: &Output, tool: &str) -> anyhow::Result<()> {
    match output.status.code() {
        // exit 0: no differences, exit 1: differences (or conflicts)
        Some(code) if code <= 1 => Ok(()),
        _ => anyhow::bail!(
            "{tool} failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        ),
    }
}

/// Unified diff of a blob pair, labeled `a/<path>` and `b/<path>`.
pub fn diff_blobs(
    database: &Database,
    path: &str,
    from: Option<&ObjectId>,
    to: Option<&ObjectId>,
) -> anyhow::Result<Vec<u8>> {
    let from_file = write_scratch_blob(database, from)?;
    let to_file = write_scratch_blob(database, to)?;

    let output = std::process::Command::new("diff")
        .arg("--unified")
        .arg("--show-c-function")
        .arg("--label")
        .arg(format!("a/{path}"))
        .arg(from_file.path())
        .arg("--label")
        .arg(format!("b/{path}"))
        .arg(to_file.path())
        .output()
        .context("failed to run external diff")?;

    ensure_tool_succeeded(&output, "diff")?;
    Ok(output.stdout)
}

/// Three-way merge of a blob triple via `diff3 -m`; the output carries
/// whatever conflict markers the tool produced.
pub fn merge_blobs(
    database: &Database,
    head: Option<&ObjectId>,
    base: Option<&ObjectId>,
    target: Option<&ObjectId>,
) -> anyhow::Result<Vec<u8>> {
    let head_file = write_scratch_blob(database, head)?;
    let base_file = write_scratch_blob(database, base)?;
    let target_file = write_scratch_blob(database, target)?;

    let target_label = target
        .map(ObjectId::to_short_oid)
        .unwrap_or_else(|| "target".to_string());

    let output = std::process::Command::new("diff3")
        .arg("-m")
        .arg("-L")
        .arg("HEAD")
        .arg(head_file.path())
        .arg("-L")
        .arg("BASE")
        .arg(base_file.path())
        .arg("-L")
        .arg(&target_label)
        .arg(target_file.path())
        .output()
        .context("failed to run external diff3")?;

    ensure_tool_succeeded(&output, "diff3")?;
    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::{diff_blobs, merge_blobs};
    use crate::areas::database::Database;
    use crate::artifacts::objects::object_id::ObjectId;
    use crate::artifacts::objects::object_type::ObjectType;

    fn database_in(dir: &tempfile::TempDir) -> Database {
        Database::with_compression(dir.path().to_path_buf().into_boxed_path(), false)
    }

    fn blob(database: &Database, content: &str) -> ObjectId {
        database
            .hash_object(content.as_bytes(), ObjectType::Blob)
            .expect("hashes")
    }

    #[test]
    fn differing_blobs_produce_labeled_hunks() {
        let dir = tempfile::tempdir().expect("temp dir");
        let database = database_in(&dir);

        let from = blob(&database, "one\n");
        let to = blob(&database, "two\n");
        let output = diff_blobs(&database, "file.txt", Some(&from), Some(&to)).expect("diffs");
        let output = String::from_utf8_lossy(&output);

        assert!(output.contains("a/file.txt"));
        assert!(output.contains("b/file.txt"));
        assert!(output.contains("-one"));
        assert!(output.contains("+two"));
    }

    #[test]
    fn equal_blobs_produce_no_output() {
        let dir = tempfile::tempdir().expect("temp dir");
        let database = database_in(&dir);

        let same = blob(&database, "same\n");
        let output = diff_blobs(&database, "file.txt", Some(&same), Some(&same)).expect("diffs");
        assert!(output.is_empty());
    }

    #[test]
    fn disjoint_edits_merge_cleanly() {
        let dir = tempfile::tempdir().expect("temp dir");
        let database = database_in(&dir);

        let base = blob(&database, "a\nb\nc\n");
        let head = blob(&database, "HEAD\nb\nc\n");
        let target = blob(&database, "a\nb\nTARGET\n");

        let merged = merge_blobs(&database, Some(&head), Some(&base), Some(&target)).expect("merges");
        assert_eq!(String::from_utf8_lossy(&merged), "HEAD\nb\nTARGET\n");
    }

    #[test]
    fn overlapping_edits_produce_conflict_markers() {
        let dir = tempfile::tempdir().expect("temp dir");
        let database = database_in(&dir);

        let base = blob(&database, "line\n");
        let head = blob(&database, "ours\n");
        let target = blob(&database, "theirs\n");

        let merged = merge_blobs(&database, Some(&head), Some(&base), Some(&target)).expect("merges");
        let merged = String::from_utf8_lossy(&merged);
        assert!(merged.contains("<<<<<<<"));
        assert!(merged.contains(">>>>>>>"));
    }
}
