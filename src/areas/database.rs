//! Content-addressed object database
//!
//! Objects are typed byte sequences framed as `"<type>\0<payload>"` and
//! stored under `objects/` with the 40-hex SHA-1 of the framed bytes as the
//! filename. Writes are idempotent and objects are never modified after
//! write; only garbage collection deletes them.
//!
//! Storage is optionally zlib-compressed. The toggle is resolved once per
//! database from the `GOGIT_NO_COMPRESS` environment variable; a
//! repository's objects are either all compressed or all plain, and mixing
//! the two is undefined.

use crate::artifacts::objects::commit::CommitObject;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::GogitError;
use anyhow::Context;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};
use std::path::Path;

/// When set, objects are written and read without zlib compression.
pub const NO_COMPRESS_ENV: &str = "GOGIT_NO_COMPRESS";

/// Object database rooted at a repository's `objects/` directory.
#[derive(Debug)]
pub struct Database {
    /// Path to the objects directory
    path: Box<Path>,
    /// Whether payloads are zlib-wrapped on disk
    compress: bool,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        let compress = std::env::var_os(NO_COMPRESS_ENV).is_none();
        Self::with_compression(path, compress)
    }

    pub fn with_compression(path: Box<Path>, compress: bool) -> Self {
        Database { path, compress }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Frame, hash, and persist a payload; returns its content address.
    ///
    /// Idempotent: an already-present object file is left untouched.
    pub fn hash_object(&self, data: &[u8], object_type: ObjectType) -> anyhow::Result<ObjectId> {
        let mut framed = Vec::with_capacity(object_type.as_str().len() + 1 + data.len());
        framed.extend_from_slice(object_type.as_str().as_bytes());
        framed.push(0);
        framed.extend_from_slice(data);

        let mut hasher = Sha1::new();
        hasher.update(&framed);
        let oid = ObjectId::try_parse(format!("{:x}", hasher.finalize()))?;

        let object_path = self.path.join(oid.as_ref());
        if object_path.exists() {
            return Ok(oid);
        }

        let content = if self.compress {
            Self::compress(framed.into())?
        } else {
            Bytes::from(framed)
        };
        std::fs::write(&object_path, &content).context(format!(
            "Unable to write object file {}",
            object_path.display()
        ))?;

        Ok(oid)
    }

    /// Load an object's payload and type.
    pub fn get_object(&self, oid: &ObjectId) -> anyhow::Result<(Bytes, ObjectType)> {
        let framed = self.read_framed(oid)?;

        let separator = framed
            .iter()
            .position(|&byte| byte == 0)
            .ok_or_else(|| GogitError::Parse(format!("object {oid} has no type header")))?;
        let object_type = std::str::from_utf8(&framed[..separator])
            .map_err(|_| GogitError::Parse(format!("object {oid} has a malformed type header")))?;
        let object_type = ObjectType::try_from(object_type)?;

        Ok((framed.slice(separator + 1..), object_type))
    }

    /// Load an object's payload, failing when the stored type differs.
    pub fn get_typed_object(&self, oid: &ObjectId, expected: ObjectType) -> anyhow::Result<Bytes> {
        let (payload, received) = self.get_object(oid)?;
        if received != expected {
            return Err(GogitError::ObjectTypeMismatch { expected, received }.into());
        }
        Ok(payload)
    }

    /// Load and parse a commit object.
    pub fn get_commit(&self, oid: &ObjectId) -> anyhow::Result<CommitObject> {
        let payload = self.get_typed_object(oid, ObjectType::Commit)?;
        CommitObject::parse(&payload)
    }

    pub fn object_exists(&self, oid: &ObjectId) -> bool {
        self.path.join(oid.as_ref()).exists()
    }

    /// Unlink an object file. Used only by garbage collection.
    pub fn delete_object(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let object_path = self.path.join(oid.as_ref());
        std::fs::remove_file(&object_path).context(format!(
            "Unable to delete object file {}",
            object_path.display()
        ))
    }

    /// Enumerate every object in the store.
    pub fn list_objects(&self) -> anyhow::Result<Vec<ObjectId>> {
        let entries = std::fs::read_dir(&self.path).context(format!(
            "Unable to read objects directory {}",
            self.path.display()
        ))?;

        let mut oids = Vec::new();
        for entry in entries {
            let entry = entry?;
            if let Ok(oid) = ObjectId::try_parse(entry.file_name().to_string_lossy().to_string()) {
                oids.push(oid);
            }
        }
        Ok(oids)
    }

    /// Read an object file verbatim, without decompressing.
    ///
    /// Remote synchronization copies object files byte-for-byte so the
    /// on-disk representation survives the transfer unchanged.
    pub fn read_raw(&self, oid: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(oid.as_ref());
        match std::fs::read(&object_path) {
            Ok(content) => Ok(content.into()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(GogitError::NotFound(format!("object {oid}")).into())
            }
            Err(err) => Err(anyhow::Error::new(err).context(format!(
                "Unable to read object file {}",
                object_path.display()
            ))),
        }
    }

    /// Write verbatim object bytes, skipping an already-present object.
    pub fn write_raw(&self, oid: &ObjectId, content: &[u8]) -> anyhow::Result<()> {
        let object_path = self.path.join(oid.as_ref());
        if object_path.exists() {
            return Ok(());
        }
        std::fs::write(&object_path, content).context(format!(
            "Unable to write object file {}",
            object_path.display()
        ))
    }

    fn read_framed(&self, oid: &ObjectId) -> anyhow::Result<Bytes> {
        let raw = self.read_raw(oid)?;

        if self.compress {
            Self::decompress(raw)
        } else {
            Ok(raw)
        }
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(Bytes::from)
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .context("Unable to decompress object content")?;

        Ok(decompressed.into())
    }
}
