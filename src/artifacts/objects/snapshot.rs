//! Staging snapshot
//!
//! A snapshot is the full path → blob mapping captured by a commit. It is
//! stored in the object store like any blob, one entry per line:
//!
//! ```text
//! <repository-relative path> <blob id>
//! ```
//!
//! Entries are kept in a `BTreeMap`, so identical mappings always serialize
//! to identical bytes and therefore to the same snapshot id.

use crate::artifacts::errors::RepositoryError;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: BTreeMap<PathBuf, ObjectId>,
}

impl Snapshot {
    pub fn new(entries: BTreeMap<PathBuf, ObjectId>) -> Self {
        Snapshot { entries }
    }

    pub fn get(&self, path: &Path) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn insert(&mut self, path: PathBuf, oid: ObjectId) -> Option<ObjectId> {
        self.entries.insert(path, oid)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&PathBuf, &ObjectId)> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay `staged` on top of this snapshot, staged entries winning
    pub fn overlay<'s>(
        mut self,
        staged: impl IntoIterator<Item = (&'s PathBuf, &'s ObjectId)>,
    ) -> Self {
        for (path, oid) in staged {
            self.entries.insert(path.clone(), oid.clone());
        }
        self
    }

    /// Parse a snapshot, reporting `snapshot_id` on failure
    pub fn parse(snapshot_id: &ObjectId, content: Bytes) -> anyhow::Result<Self> {
        Self::deserialize(content)
            .map_err(|_| RepositoryError::EmptyOrMissingSnapshot(snapshot_id.to_string()).into())
    }
}

impl Packable for Snapshot {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = self
            .entries
            .iter()
            .map(|(path, oid)| {
                let path = path
                    .to_str()
                    .with_context(|| format!("Snapshot path is not UTF-8: {path:?}"))?;
                Ok(format!("{path} {oid}\n"))
            })
            .collect::<anyhow::Result<String>>()?;

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Snapshot {
    fn deserialize(content: Bytes) -> anyhow::Result<Self> {
        let content = String::from_utf8(content.to_vec())?;

        let entries = content
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| {
                // paths may contain spaces, the id never does
                let (path, oid) = line
                    .rsplit_once(' ')
                    .ok_or_else(|| anyhow::anyhow!("Invalid snapshot entry: {line}"))?;
                if path.is_empty() {
                    anyhow::bail!("Invalid snapshot entry: {line}");
                }

                Ok((PathBuf::from(path), ObjectId::try_parse(oid.to_string())?))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

        Ok(Self::new(entries))
    }
}

impl Object for Snapshot {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|(path, oid)| format!("{oid}\t{}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
