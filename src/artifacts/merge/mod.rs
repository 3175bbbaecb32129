//! Ancestry, merge base, and three-way tree merging
//!
//! The merge base of two commits is the first commit in the traversal of
//! one that also appears among the ancestors of the other. Because the
//! walk is first-parent-first, the nearest mainline ancestor wins. The
//! three-way tree merge keeps paths where both sides agree and hands every
//! disagreement to the external `diff3` driver, persisting its output as a
//! fresh blob.

use crate::areas::database::Database;
use crate::artifacts::diff::{self, driver};
use crate::artifacts::log::rev_walk::RevWalk;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::FlatTree;
use crate::errors::GogitError;
use std::collections::HashSet;

/// True when `ancestor` appears strictly inside the history of `descendant`.
pub fn is_ancestor_of(
    database: &Database,
    ancestor: &ObjectId,
    descendant: &ObjectId,
) -> anyhow::Result<bool> {
    for oid in RevWalk::new(database, vec![descendant.clone()]) {
        let oid = oid?;
        if &oid == ancestor && ancestor != descendant {
            return Ok(true);
        }
    }
    Ok(false)
}

/// First commit reachable from `right` that is also an ancestor of `left`.
pub fn merge_base(
    database: &Database,
    left: &ObjectId,
    right: &ObjectId,
) -> anyhow::Result<ObjectId> {
    let mut left_ancestors = HashSet::new();
    for oid in RevWalk::new(database, vec![left.clone()]) {
        left_ancestors.insert(oid?);
    }

    for oid in RevWalk::new(database, vec![right.clone()]) {
        let oid = oid?;
        if left_ancestors.contains(&oid) {
            return Ok(oid);
        }
    }

    Err(GogitError::NoCommonAncestor {
        left: left.to_string(),
        right: right.to_string(),
    }
    .into())
}

/// Commits reachable from `head` but not from `target`, oldest first.
///
/// The walk yields newest-first along the first-parent chain, so the
/// collected list is reversed to respect topological parent precedence
/// when rebase replays it.
pub fn rebase_commits(
    database: &Database,
    target: &ObjectId,
    head: &ObjectId,
) -> anyhow::Result<Vec<ObjectId>> {
    let mut target_ancestors = HashSet::new();
    for oid in RevWalk::new(database, vec![target.clone()]) {
        target_ancestors.insert(oid?);
    }

    let mut commits = Vec::new();
    for oid in RevWalk::new(database, vec![head.clone()]) {
        let oid = oid?;
        if !target_ancestors.contains(&oid) {
            commits.push(oid);
        }
    }

    commits.reverse();
    Ok(commits)
}

/// Three-way merge of flattened trees into a new flat tree.
///
/// Per path: agreeing sides win outright (this also drops a path deleted
/// on both sides); disagreeing sides are merged through `diff3` and the
/// result (conflict markers included) becomes a new blob.
pub fn merge_trees(
    database: &Database,
    base: &FlatTree,
    head: &FlatTree,
    target: &FlatTree,
) -> anyhow::Result<FlatTree> {
    let mut merged = FlatTree::new();

    for (path, oids) in diff::compare_trees(&[base, head, target]) {
        let (base_oid, head_oid, target_oid) = (&oids[0], &oids[1], &oids[2]);

        if head_oid == target_oid {
            if let Some(oid) = head_oid {
                merged.insert(path, oid.clone());
            }
            continue;
        }

        let output = driver::merge_blobs(
            database,
            head_oid.as_ref(),
            base_oid.as_ref(),
            target_oid.as_ref(),
        )?;
        let oid = database.hash_object(&output, ObjectType::Blob)?;
        merged.insert(path, oid);
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::{is_ancestor_of, merge_base, rebase_commits};
    use crate::areas::database::Database;
    use crate::artifacts::objects::commit::CommitObject;
    use crate::artifacts::objects::object_id::ObjectId;
    use crate::artifacts::objects::object_type::ObjectType;
    use crate::errors::GogitError;
    use pretty_assertions::assert_eq;

    fn database_in(dir: &tempfile::TempDir) -> Database {
        Database::with_compression(dir.path().to_path_buf().into_boxed_path(), false)
    }

    fn timestamp() -> chrono::DateTime<chrono::FixedOffset> {
        chrono::DateTime::parse_from_rfc3339("2024-05-01T12:00:00+00:00").expect("valid timestamp")
    }

    fn store_commit(database: &Database, parents: Vec<ObjectId>, message: &str) -> ObjectId {
        let tree = database
            .hash_object(message.as_bytes(), ObjectType::Tree)
            .expect("tree");
        let commit = CommitObject::new(tree, parents, timestamp(), message.to_string());
        database
            .hash_object(&commit.serialize(), ObjectType::Commit)
            .expect("commit")
    }

    #[test]
    fn ancestry_is_strict() {
        let dir = tempfile::tempdir().expect("temp dir");
        let database = database_in(&dir);

        let c1 = store_commit(&database, vec![], "one");
        let c2 = store_commit(&database, vec![c1.clone()], "two");

        assert!(is_ancestor_of(&database, &c1, &c2).expect("walks"));
        assert!(!is_ancestor_of(&database, &c2, &c1).expect("walks"));
        // a commit is not its own ancestor
        assert!(!is_ancestor_of(&database, &c2, &c2).expect("walks"));
    }

    #[test]
    fn merge_base_of_divergent_branches_is_the_fork_point() {
        let dir = tempfile::tempdir().expect("temp dir");
        let database = database_in(&dir);

        let fork = store_commit(&database, vec![], "fork");
        let left = store_commit(&database, vec![fork.clone()], "left");
        let right = store_commit(&database, vec![fork.clone()], "right");

        assert_eq!(merge_base(&database, &left, &right).expect("finds"), fork);
        assert_eq!(merge_base(&database, &right, &left).expect("finds"), fork);
    }

    #[test]
    fn merge_base_is_reflexive() {
        let dir = tempfile::tempdir().expect("temp dir");
        let database = database_in(&dir);

        let only = store_commit(&database, vec![], "only");
        assert_eq!(merge_base(&database, &only, &only).expect("finds"), only);
    }

    #[test]
    fn disconnected_histories_have_no_common_ancestor() {
        let dir = tempfile::tempdir().expect("temp dir");
        let database = database_in(&dir);

        let left = store_commit(&database, vec![], "left root");
        let right = store_commit(&database, vec![], "right root");

        let err = merge_base(&database, &left, &right).expect_err("fails");
        assert!(matches!(
            err.downcast_ref::<GogitError>(),
            Some(GogitError::NoCommonAncestor { .. })
        ));
    }

    #[test]
    fn rebase_commits_are_head_only_and_oldest_first() {
        let dir = tempfile::tempdir().expect("temp dir");
        let database = database_in(&dir);

        let c1 = store_commit(&database, vec![], "c1");
        let c2 = store_commit(&database, vec![c1.clone()], "c2");
        let f1 = store_commit(&database, vec![c1.clone()], "f1");
        let f2 = store_commit(&database, vec![f1.clone()], "f2");

        let replay = rebase_commits(&database, &c2, &f2).expect("collects");
        assert_eq!(replay, vec![f1, f2]);
    }
}
