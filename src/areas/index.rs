//! Staging area
//!
//! Each branch owns its own staging file under `staging/heads/<branch>`;
//! a detached HEAD stages into `staging/DETACHED`. The file uses the same
//! `path hash` line format as a committed snapshot.
//!
//! Staged entries are overlaid on the parent commit's snapshot when a commit
//! is written, then the staging file is cleared.

use crate::areas::refs::Head;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::snapshot::Snapshot;
use anyhow::Context;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

const DETACHED_STAGE: &str = "DETACHED";

/// How a `record` call changed the staging area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// The path was neither staged nor committed before
    Added,
    /// The path was staged or committed with different content
    Updated,
    /// The same content is already staged or committed; nothing recorded
    Unchanged,
}

impl std::fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            StageOutcome::Added => "new file",
            StageOutcome::Updated => "updated",
            StageOutcome::Unchanged => "unchanged",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the staging directory (typically `.minigit/staging`)
    path: Box<Path>,
    /// Staging file of the HEAD the index was last loaded for
    stage_file: Option<PathBuf>,
    entries: Snapshot,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            stage_file: None,
            entries: Snapshot::default(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Staging file backing `head`
    pub fn stage_file_for(&self, head: &Head) -> PathBuf {
        match head {
            Head::Branch(name) => self.path.join("heads").join(name.as_ref()),
            Head::Detached(_) => self.path.join(DETACHED_STAGE),
        }
    }

    /// Load the staged entries of `head` from disk
    ///
    /// A missing staging file is an empty staging area.
    pub fn rehydrate(&mut self, head: &Head) -> anyhow::Result<()> {
        let stage_file = self.stage_file_for(head);
        self.entries = Snapshot::default();
        self.changed = false;

        if stage_file.exists() {
            let mut file = std::fs::OpenOptions::new().read(true).open(&stage_file)?;
            let mut lock = file_guard::lock(&mut file, file_guard::Lock::Shared, 0, 1)?;

            let mut content = Vec::new();
            lock.deref_mut().read_to_end(&mut content)?;

            self.entries = Snapshot::deserialize(content.into()).with_context(|| {
                format!("corrupt staging file at {}", stage_file.display())
            })?;
        }

        self.stage_file = Some(stage_file);
        Ok(())
    }

    /// Stage `oid` for `path`
    ///
    /// `committed` is the blob recorded for `path` in the HEAD commit, used to
    /// tell re-adding unchanged content apart from a real modification.
    pub fn record(
        &mut self,
        path: PathBuf,
        oid: ObjectId,
        committed: Option<&ObjectId>,
    ) -> StageOutcome {
        let outcome = match (self.entry_by_path(&path), committed) {
            (Some(staged), _) if staged == &oid => StageOutcome::Unchanged,
            (None, Some(committed)) if committed == &oid => StageOutcome::Unchanged,
            (None, None) => StageOutcome::Added,
            _ => StageOutcome::Updated,
        };

        if outcome != StageOutcome::Unchanged {
            self.entries.insert(path, oid);
            self.changed = true;
        }

        outcome
    }

    pub fn entries(&self) -> impl Iterator<Item = (&PathBuf, &ObjectId)> {
        self.entries.entries()
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The snapshot a commit on top of `base` would capture
    pub fn snapshot(&self, base: Snapshot) -> Snapshot {
        base.overlay(self.entries.entries())
    }

    /// Drop every staged entry; persisted by the next `write_updates`
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries = Snapshot::default();
            self.changed = true;
        }
    }

    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let stage_file = self
            .stage_file
            .clone()
            .context("staging area written before being loaded")?;
        std::fs::create_dir_all(
            stage_file
                .parent()
                .with_context(|| format!("invalid staging file {}", stage_file.display()))?,
        )?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&stage_file)
            .with_context(|| format!("failed to open staging file {}", stage_file.display()))?;
        let mut lock = file_guard::lock(&mut file, file_guard::Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(&self.entries.serialize()?)?;

        self.changed = false;
        Ok(())
    }
}
