//! Repository facade
//!
//! Bundles the object database, refs, index, and workspace for one working
//! directory, plus the output writer commands print through. Command
//! implementations live under `crate::commands` as `impl Repository`
//! blocks.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Repo directory name at the working-dir root
pub const GOGIT_DIR: &str = ".gogit";

/// Object database directory name
const DATABASE_DIR: &str = "objects";

/// Index file name
const INDEX_FILE: &str = "index";

pub struct Repository {
    /// Working directory root
    path: Box<Path>,
    /// Repo directory (`<root>/.gogit`)
    repo_path: Box<Path>,
    /// Output writer (stdout in the CLI, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    index: Index,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let repo_path = path.join(GOGIT_DIR);

        Ok(Repository {
            database: Database::new(repo_path.join(DATABASE_DIR).into_boxed_path()),
            index: Index::new(repo_path.join(INDEX_FILE).into_boxed_path()),
            workspace: Workspace::new(path.clone().into_boxed_path()),
            refs: Refs::new(repo_path.clone().into_boxed_path()),
            repo_path: repo_path.into_boxed_path(),
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}
