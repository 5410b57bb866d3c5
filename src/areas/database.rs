//! Content-addressed object database
//!
//! Blobs and snapshots live under `objects/`, commit records under `commits/`.
//! Each object is stored zlib-compressed at `<namespace>/<xx>/<yyyy...>` where
//! the id is the SHA-1 of the uncompressed bytes.
//!
//! Writes go through a temporary file followed by a rename, and are skipped
//! entirely when the object already exists. Storing the same content twice
//! therefore yields the same id and a single physical copy, which makes object
//! writes the only operation that is safe to race.

use crate::artifacts::errors::RepositoryError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::snapshot::Snapshot;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    /// `path` is the repository metadata directory (`.minigit`)
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn namespace_path(&self, object_type: ObjectType) -> PathBuf {
        self.path.join(object_type.namespace())
    }

    fn object_path(&self, object_type: ObjectType, object_id: &ObjectId) -> PathBuf {
        self.namespace_path(object_type).join(object_id.to_path())
    }

    /// Store an object unless an object with the same id is already present
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_content = object.serialize()?;
        let object_id = object.object_id()?;
        let object_path = self.object_path(object.object_type(), &object_id);

        if object_path.exists() {
            debug!(oid = %object_id, kind = %object.object_type(), "object already stored");
            return Ok(object_id);
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(object_path, object_content)?;
        debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    pub fn contains(&self, object_type: ObjectType, object_id: &ObjectId) -> bool {
        self.object_path(object_type, object_id).exists()
    }

    /// Raw bytes of an object, failing with `ObjectNotFound` when absent
    pub fn load(&self, object_type: ObjectType, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_type, object_id);

        if !object_path.exists() {
            return Err(RepositoryError::ObjectNotFound(object_id.to_string()).into());
        }

        self.read_object(object_path)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        Blob::deserialize(self.load(ObjectType::Blob, object_id)?)
    }

    /// Load a staging snapshot, failing with `EmptyOrMissingSnapshot`
    pub fn load_snapshot(&self, snapshot_id: &ObjectId) -> anyhow::Result<Snapshot> {
        let content = self
            .load(ObjectType::Blob, snapshot_id)
            .map_err(|_| RepositoryError::EmptyOrMissingSnapshot(snapshot_id.to_string()))?;

        Snapshot::parse(snapshot_id, content)
    }

    /// Load a commit record, failing with `CorruptCommit` when it is missing or malformed
    pub fn load_commit(&self, commit_id: &ObjectId) -> anyhow::Result<Commit> {
        let corrupt = || RepositoryError::CorruptCommit(commit_id.to_string());

        let content = self
            .load(ObjectType::Commit, commit_id)
            .map_err(|_| corrupt())?;

        Commit::deserialize(content).map_err(|error| {
            debug!(oid = %commit_id, %error, "unable to parse commit record");
            corrupt().into()
        })
    }

    /// Snapshot captured by a commit, or an empty one when there is no commit yet
    pub fn load_commit_snapshot(&self, commit_id: Option<&ObjectId>) -> anyhow::Result<Snapshot> {
        match commit_id {
            Some(commit_id) => {
                let commit = self.load_commit(commit_id)?;
                self.load_snapshot(commit.snapshot_oid())
            }
            None => Ok(Snapshot::default()),
        }
    }

    /// Find all objects of `object_type` whose id starts with `prefix`
    ///
    /// Only the fan-out directory named by the first two characters is scanned.
    pub fn find_objects_by_prefix(
        &self,
        object_type: ObjectType,
        prefix: &str,
    ) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        if prefix.len() < 2 {
            return Ok(Vec::new());
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.namespace_path(object_type).join(dir_name);

        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for entry in std::fs::read_dir(&dir_path)? {
            let file_name = entry?.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(file_prefix)
                && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}"))
            {
                matches.push(oid);
            }
        }

        Ok(matches)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
