//! Named references (branches, tags, HEAD, MERGE_HEAD)
//!
//! A reference is a file under the repo directory whose content is either a
//! 40-hex oid (direct) or `ref: <name>` (symbolic). Symbolic chains are
//! chased recursively up to a fixed depth; a chain ending at a nonexistent
//! ref reads as empty rather than as an error.
//!
//! ## HEAD states
//!
//! - On a branch: `HEAD` is symbolic to `refs/heads/<branch>`, and updating
//!   `HEAD` with `deref` lands on the branch ref.
//! - Detached: `HEAD` holds an oid directly and updates land on `HEAD`.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::Path;
use walkdir::WalkDir;

pub const HEAD: &str = "HEAD";
pub const MERGE_HEAD: &str = "MERGE_HEAD";
pub const DEFAULT_BRANCH_REF: &str = "refs/heads/main";

const SYMREF_PREFIX: &str = "ref: ";

/// Upper bound on symbolic indirection, guarding against accidental cycles.
const MAX_SYMREF_DEPTH: usize = 32;

/// The parsed content of a reference file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefTarget {
    /// Points at an object directly
    Direct(ObjectId),
    /// Points at another reference by name
    Symbolic(String),
}

impl RefTarget {
    pub fn oid(&self) -> Option<&ObjectId> {
        match self {
            RefTarget::Direct(oid) => Some(oid),
            RefTarget::Symbolic(_) => None,
        }
    }

    fn serialize(&self) -> String {
        match self {
            RefTarget::Direct(oid) => oid.to_string(),
            RefTarget::Symbolic(name) => format!("{SYMREF_PREFIX}{name}"),
        }
    }

    fn parse(content: &str) -> anyhow::Result<Option<RefTarget>> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        if let Some(target) = content.strip_prefix(SYMREF_PREFIX) {
            Ok(Some(RefTarget::Symbolic(target.to_string())))
        } else {
            Ok(Some(RefTarget::Direct(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }
}

/// Reference store rooted at the repo directory.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repo directory holding `HEAD` and `refs/`
    path: Box<Path>,
}

impl Refs {
    /// Read a reference, optionally chasing symbolic links to the terminal.
    ///
    /// A missing or empty reference reads as `None`.
    pub fn get(&self, name: &str, deref: bool) -> anyhow::Result<Option<RefTarget>> {
        let (_, target) = self.resolve(name, deref)?;
        Ok(target)
    }

    /// Read the oid a reference ultimately points at.
    pub fn read_oid(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        Ok(self.get(name, true)?.and_then(|target| match target {
            RefTarget::Direct(oid) => Some(oid),
            RefTarget::Symbolic(_) => None,
        }))
    }

    /// Write a reference.
    ///
    /// With `deref`, a symbolic reference is followed and the write lands on
    /// the ultimate target; this is how a commit advances the current branch
    /// through `HEAD` without rewriting `HEAD` itself.
    pub fn update(&self, name: &str, target: &RefTarget, deref: bool) -> anyhow::Result<()> {
        let (name, _) = self.resolve(name, deref)?;

        let ref_path = self.path.join(&name);
        if let Some(parent) = ref_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create ref directory for {name}"))?;
        }
        std::fs::write(&ref_path, target.serialize())
            .with_context(|| format!("failed to write ref {name}"))
    }

    /// Delete a reference; a missing file is not an error.
    pub fn delete(&self, name: &str, deref: bool) -> anyhow::Result<()> {
        let (name, _) = self.resolve(name, deref)?;

        match std::fs::remove_file(self.path.join(&name)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(anyhow::Error::new(err).context(format!("failed to delete ref {name}")))
            }
        }
    }

    /// Enumerate `HEAD`, `MERGE_HEAD`, and every ref under `refs/<prefix>`.
    ///
    /// Entries whose (dereferenced) value is empty are skipped; they may
    /// race with a deletion. Walk errors abort the iteration.
    pub fn iter_refs(&self, prefix: &str, deref: bool) -> anyhow::Result<Vec<(String, RefTarget)>> {
        let mut names = vec![HEAD.to_string(), MERGE_HEAD.to_string()];

        let refs_dir = self.path.join("refs").join(prefix);
        if refs_dir.exists() {
            for entry in WalkDir::new(&refs_dir) {
                let entry = entry.context("failed to walk refs directory")?;
                if entry.file_type().is_file() {
                    let relative = entry
                        .path()
                        .strip_prefix(self.path.as_ref())
                        .context("ref file outside the repo directory")?;
                    names.push(relative.to_string_lossy().to_string());
                }
            }
        }

        let mut refs = Vec::new();
        for name in names {
            if let Some(target) = self.get(&name, deref)? {
                refs.push((name, target));
            }
        }
        Ok(refs)
    }

    /// Follow a (possibly symbolic) reference and return the terminal ref
    /// name together with its parsed value.
    fn resolve(&self, name: &str, deref: bool) -> anyhow::Result<(String, Option<RefTarget>)> {
        let mut name = name.to_string();

        for _ in 0..MAX_SYMREF_DEPTH {
            let ref_path = self.path.join(&name);
            let content = match std::fs::read_to_string(&ref_path) {
                Ok(content) => content,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok((name, None)),
                Err(err) => {
                    return Err(
                        anyhow::Error::new(err).context(format!("failed to read ref {name}"))
                    );
                }
            };

            match RefTarget::parse(&content)? {
                Some(RefTarget::Symbolic(next)) if deref => name = next,
                target => return Ok((name, target)),
            }
        }

        anyhow::bail!("symbolic ref chain too deep at {name}")
    }
}
