//! Tree construction and materialization
//!
//! Bridges the flat index and the nested tree objects: `write_tree` lifts
//! the index into directory maps and hashes trees bottom-up, `read_tree`
//! flattens a stored tree back into a path map, and the `read_tree_*`
//! helpers replace the index (and optionally the working directory) with a
//! tree or with a three-way merge result.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::merge;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{self, FlatTree, TreeEntry};
use crate::errors::GogitError;
use std::collections::BTreeMap;

/// The index lifted into its directory structure.
#[derive(Debug)]
pub(crate) enum IndexNode {
    Leaf(ObjectId),
    Dir(BTreeMap<String, IndexNode>),
}

/// Split flat paths on `/` into nested directory maps.
pub(crate) fn structured_index(index: &FlatTree) -> BTreeMap<String, IndexNode> {
    let mut root = BTreeMap::new();
    for (path, oid) in index {
        let parts = path.split('/').collect::<Vec<_>>();
        insert_path(&mut root, &parts, oid);
    }
    root
}

fn insert_path(map: &mut BTreeMap<String, IndexNode>, parts: &[&str], oid: &ObjectId) {
    if parts.len() == 1 {
        map.insert(parts[0].to_string(), IndexNode::Leaf(oid.clone()));
        return;
    }

    let child = map
        .entry(parts[0].to_string())
        .or_insert_with(|| IndexNode::Dir(BTreeMap::new()));
    if let IndexNode::Dir(children) = child {
        insert_path(children, &parts[1..], oid);
    }
}

/// Hash the current index as a nested tree, bottom-up; returns the root
/// tree oid. Fails with `NothingToCommit` when no index file exists.
pub fn write_tree(database: &Database, index: &Index) -> anyhow::Result<ObjectId> {
    let Some(flat) = index.load()? else {
        return Err(GogitError::NothingToCommit.into());
    };

    let root = structured_index(&flat);
    write_tree_level(database, &root)
}

fn write_tree_level(
    database: &Database,
    level: &BTreeMap<String, IndexNode>,
) -> anyhow::Result<ObjectId> {
    let mut entries = Vec::new();

    for (name, node) in level {
        match node {
            IndexNode::Leaf(oid) => {
                entries.push(TreeEntry::new(name.clone(), oid.clone(), ObjectType::Blob));
            }
            IndexNode::Dir(children) => {
                let oid = write_tree_level(database, children)?;
                entries.push(TreeEntry::new(name.clone(), oid, ObjectType::Tree));
            }
        }
    }

    let payload = tree::serialize_entries(&entries);
    database.hash_object(&payload, ObjectType::Tree)
}

/// Flatten a stored tree into a `path → blob oid` map. `None` stands for
/// the empty tree.
pub fn read_tree(
    database: &Database,
    tree_oid: Option<&ObjectId>,
    base: &str,
) -> anyhow::Result<FlatTree> {
    let mut flat = FlatTree::new();
    if let Some(tree_oid) = tree_oid {
        flatten_tree(database, tree_oid, base, &mut flat)?;
    }
    Ok(flat)
}

fn flatten_tree(
    database: &Database,
    tree_oid: &ObjectId,
    base: &str,
    flat: &mut FlatTree,
) -> anyhow::Result<()> {
    let payload = database.get_typed_object(tree_oid, ObjectType::Tree)?;

    for entry in tree::parse_entries(&payload)? {
        let path = format!("{base}{}", entry.name);
        match entry.entry_type {
            ObjectType::Blob => {
                flat.insert(path, entry.oid);
            }
            ObjectType::Tree => flatten_tree(database, &entry.oid, &format!("{path}/"), flat)?,
            ObjectType::Commit => {
                return Err(GogitError::Parse(format!(
                    "unexpected commit entry {path} in tree {tree_oid}"
                ))
                .into());
            }
        }
    }

    Ok(())
}

/// Replace the index with a tree's flattened contents, optionally
/// materializing it onto the working directory.
pub fn read_tree_into_index(
    repository: &Repository,
    tree_oid: &ObjectId,
    update_working_dir: bool,
) -> anyhow::Result<()> {
    repository.index().with_index(|index| {
        *index = read_tree(repository.database(), Some(tree_oid), "")?;

        if update_working_dir {
            repository
                .workspace()
                .checkout_index(repository.database(), index)?;
        }
        Ok(())
    })
}

/// Replace the index with the three-way merge of a tree triple, optionally
/// materializing the result onto the working directory.
pub fn read_tree_merged(
    repository: &Repository,
    base_tree: &ObjectId,
    head_tree: &ObjectId,
    target_tree: &ObjectId,
    update_working_dir: bool,
) -> anyhow::Result<()> {
    repository.index().with_index(|index| {
        let database = repository.database();
        *index = merge::merge_trees(
            database,
            &read_tree(database, Some(base_tree), "")?,
            &read_tree(database, Some(head_tree), "")?,
            &read_tree(database, Some(target_tree), "")?,
        )?;

        if update_working_dir {
            repository.workspace().checkout_index(database, index)?;
        }
        Ok(())
    })
}
