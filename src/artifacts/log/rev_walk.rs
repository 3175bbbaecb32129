//! Commit graph traversal
//!
//! `RevWalk` yields each reachable commit exactly once. After yielding a
//! commit, its first parent goes to the front of the worklist and the
//! remaining parents to the back, so first-parent history is emitted
//! contiguously and merged-in branches follow the mainline. Log output and
//! the rebase replay set both depend on this order.

use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree;
use std::collections::{HashSet, VecDeque};

pub struct RevWalk<'a> {
    database: &'a Database,
    pending: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'a> RevWalk<'a> {
    pub fn new(database: &'a Database, roots: Vec<ObjectId>) -> Self {
        RevWalk {
            database,
            pending: roots.into(),
            visited: HashSet::new(),
        }
    }
}

impl Iterator for RevWalk<'_> {
    type Item = anyhow::Result<ObjectId>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(oid) = self.pending.pop_front() {
            if !self.visited.insert(oid.clone()) {
                continue;
            }

            let commit = match self.database.get_commit(&oid) {
                Ok(commit) => commit,
                Err(err) => return Some(Err(err)),
            };

            let mut parents = commit.parent_oids().iter();
            if let Some(first) = parents.next() {
                self.pending.push_front(first.clone());
            }
            for parent in parents {
                self.pending.push_back(parent.clone());
            }

            return Some(Ok(oid));
        }

        None
    }
}

/// Compute the full object closure of a set of commits: every commit, its
/// tree, and all trees and blobs below. Shared subtrees are walked once.
pub fn objects_in_commits(
    database: &Database,
    roots: Vec<ObjectId>,
) -> anyhow::Result<HashSet<ObjectId>> {
    let mut reachable = HashSet::new();

    for oid in RevWalk::new(database, roots) {
        let oid = oid?;
        let commit = database.get_commit(&oid)?;
        reachable.insert(oid);
        objects_in_tree(database, commit.tree_oid(), &mut reachable)?;
    }

    Ok(reachable)
}

fn objects_in_tree(
    database: &Database,
    tree_oid: &ObjectId,
    reachable: &mut HashSet<ObjectId>,
) -> anyhow::Result<()> {
    if !reachable.insert(tree_oid.clone()) {
        return Ok(());
    }

    let payload = database.get_typed_object(tree_oid, ObjectType::Tree)?;
    for entry in tree::parse_entries(&payload)? {
        match entry.entry_type {
            ObjectType::Tree => objects_in_tree(database, &entry.oid, reachable)?,
            _ => {
                reachable.insert(entry.oid);
            }
        }
    }

    Ok(())
}
