//! Push and fetch between repositories on the same filesystem
//!
//! A remote is a local path holding a sibling repo directory. The remote
//! side gets its own `Database` and `Refs` rooted at that path; object
//! files are copied verbatim so their on-disk representation survives the
//! transfer. Push refuses to overwrite remote history it has not seen:
//! the remote branch value must be a strict ancestor of the local value.

use crate::areas::database::Database;
use crate::areas::refs::{RefTarget, Refs};
use crate::areas::repository::{GOGIT_DIR, Repository};
use crate::artifacts::log::rev_walk;
use crate::artifacts::merge;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::GogitError;
use std::path::{Path, PathBuf};

const HEADS_PREFIX: &str = "refs/heads/";
const REMOTE_REF_DIR: &str = "refs/remote";

/// Accept either a working directory or a repo directory; the repo dir
/// name is appended when missing, and the result must exist.
pub fn normalize_remote_path(path: &str) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(path);
    let path = if path.file_name() == Some(std::ffi::OsStr::new(GOGIT_DIR)) {
        path
    } else {
        path.join(GOGIT_DIR)
    };

    if !path.exists() {
        return Err(
            GogitError::NotFound(format!("remote repository {}", path.display())).into(),
        );
    }
    Ok(path)
}

fn remote_stores(remote_path: &Path) -> (Database, Refs) {
    let database = Database::new(remote_path.join("objects").into_boxed_path());
    let refs = Refs::new(remote_path.to_path_buf().into_boxed_path());
    (database, refs)
}

fn remote_ref_values(refs: &Refs, prefix: &str) -> anyhow::Result<Vec<(String, ObjectId)>> {
    Ok(refs
        .iter_refs(prefix, true)?
        .into_iter()
        .filter_map(|(name, target)| match target {
            RefTarget::Direct(oid) => Some((name, oid)),
            RefTarget::Symbolic(_) => None,
        })
        .collect())
}

/// Push a branch ref: copy the objects the remote is missing, then advance
/// the remote branch. Refuses (with no writes) unless the remote branch is
/// unborn or a strict ancestor of the local value.
pub fn push(repository: &Repository, remote_path: &Path, ref_name: &str) -> anyhow::Result<()> {
    let ref_name = if ref_name.starts_with(HEADS_PREFIX) {
        ref_name.to_string()
    } else {
        format!("{HEADS_PREFIX}{ref_name}")
    };

    let (remote_database, remote_refs) = remote_stores(remote_path);
    let remote_values = remote_ref_values(&remote_refs, "")?;

    let local_oid = repository
        .refs()
        .read_oid(&ref_name)?
        .ok_or_else(|| GogitError::NotFound(format!("ref {ref_name}")))?;

    if let Some((_, remote_oid)) = remote_values.iter().find(|(name, _)| name == &ref_name) {
        if !merge::is_ancestor_of(repository.database(), remote_oid, &local_oid)? {
            return Err(GogitError::NonFastForward.into());
        }
    }

    // objects the remote already has, judged by the remote refs whose
    // closures we can walk locally
    let known_roots = remote_values
        .into_iter()
        .map(|(_, oid)| oid)
        .filter(|oid| repository.database().object_exists(oid))
        .collect::<Vec<_>>();
    let remote_known = rev_walk::objects_in_commits(repository.database(), known_roots)?;

    let to_push = rev_walk::objects_in_commits(repository.database(), vec![local_oid.clone()])?;
    for oid in &to_push {
        if !remote_known.contains(oid) {
            let raw = repository.database().read_raw(oid)?;
            remote_database.write_raw(oid, &raw)?;
        }
    }

    remote_refs.update(&ref_name, &RefTarget::Direct(local_oid), true)
}

/// Fetch every remote branch: copy locally-missing objects from the remote
/// heads' closures and record the tips under `refs/remote/`.
pub fn fetch(repository: &Repository, remote_path: &Path) -> anyhow::Result<()> {
    let (remote_database, remote_refs) = remote_stores(remote_path);
    let branches = remote_ref_values(&remote_refs, "heads")?
        .into_iter()
        .filter(|(name, _)| name.starts_with(HEADS_PREFIX))
        .collect::<Vec<_>>();

    let roots = branches.iter().map(|(_, oid)| oid.clone()).collect();
    for oid in rev_walk::objects_in_commits(&remote_database, roots)? {
        if !repository.database().object_exists(&oid) {
            let raw = remote_database.read_raw(&oid)?;
            repository.database().write_raw(&oid, &raw)?;
        }
    }

    for (name, oid) in branches {
        let branch = name.rsplit('/').next().unwrap_or(name.as_str());
        repository.refs().update(
            &format!("{REMOTE_REF_DIR}/{branch}"),
            &RefTarget::Direct(oid),
            false,
        )?;
    }

    Ok(())
}
