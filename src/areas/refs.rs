//! Branch references, branch authors and HEAD
//!
//! ## File Format
//!
//! - `refs/<branch>`: a single line holding the branch head commit id, or
//!   nothing when the branch has no commits yet
//! - `authors/<branch>`: a single line holding the branch author identity
//! - `HEAD`: a single line, either a branch name (attached) or a raw commit
//!   id (detached)
//!
//! Each file write takes an exclusive `file_guard` lock so a reader never
//! observes a torn line. Read-modify-write sequences such as advancing a
//! branch head are not isolated: one process per repository is a
//! precondition of every operation.

use crate::artifacts::branch::HEAD_REF_NAME;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::RepositoryError;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use tracing::info;

/// What HEAD points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// Attached to a branch; commits advance that branch
    Branch(BranchName),
    /// Detached at a commit; commits move HEAD itself
    Detached(ObjectId),
}

impl Head {
    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached(_))
    }

    /// Short description used in command output
    pub fn label(&self) -> String {
        match self {
            Head::Branch(name) => name.to_string(),
            Head::Detached(_) => "detached HEAD".to_string(),
        }
    }
}

impl std::fmt::Display for Head {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Head::Branch(name) => write!(f, "{name}"),
            Head::Detached(oid) => write!(f, "{oid}"),
        }
    }
}

/// Reference store rooted at the repository metadata directory
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn authors_path(&self) -> PathBuf {
        self.path.join("authors")
    }

    fn branch_path(&self, name: &BranchName) -> PathBuf {
        self.refs_path().join(name.as_ref())
    }

    fn author_path(&self, name: &BranchName) -> PathBuf {
        self.authors_path().join(name.as_ref())
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_file()
    }

    /// Create `name` pointing at `head` (None for a branch without commits)
    ///
    /// Fails with `InvalidAuthor` for a multi-line `author`.
    pub fn create_branch(
        &self,
        name: &BranchName,
        head: Option<&ObjectId>,
        author: &str,
    ) -> anyhow::Result<()> {
        if self.branch_exists(name) {
            return Err(RepositoryError::BranchExists(name.to_string()).into());
        }
        let author = Author::validate_identity(author)?;

        let raw_head = head.map(|oid| oid.to_string()).unwrap_or_default();
        self.update_ref_file(&self.branch_path(name), &raw_head)?;
        self.update_ref_file(&self.author_path(name), &author)?;

        info!(branch = %name, head = %raw_head, "created branch");
        Ok(())
    }

    /// Head commit of a branch; `Ok(None)` when the branch has no commits yet
    pub fn read_branch_head(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);
        if !branch_path.is_file() {
            return Err(RepositoryError::UnknownBranch(name.to_string()).into());
        }

        match Self::read_ref_file(&branch_path)? {
            Some(content) => Ok(Some(ObjectId::try_parse(content).with_context(|| {
                format!("corrupt ref file at {}", branch_path.display())
            })?)),
            None => Ok(None),
        }
    }

    /// Overwrite a branch head; no compare-and-swap
    pub fn update_branch_head(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if !self.branch_exists(name) {
            return Err(RepositoryError::UnknownBranch(name.to_string()).into());
        }

        self.update_ref_file(&self.branch_path(name), oid.as_ref())?;
        info!(branch = %name, head = %oid, "updated branch head");

        Ok(())
    }

    pub fn read_author(&self, name: &BranchName) -> anyhow::Result<Option<String>> {
        Self::read_ref_file(&self.author_path(name))
    }

    pub fn set_head(&self, head: &Head) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), &head.to_string())?;
        info!(%head, "moved HEAD");

        Ok(())
    }

    pub fn read_head(&self) -> anyhow::Result<Head> {
        let head_path = self.head_path();
        let content = Self::read_ref_file(&head_path)?
            .with_context(|| format!("HEAD file at {} is empty", head_path.display()))?;

        if let Ok(name) = BranchName::try_parse(content.clone())
            && self.branch_exists(&name)
        {
            return Ok(Head::Branch(name));
        }

        match ObjectId::try_parse(content.clone()) {
            Ok(oid) => Ok(Head::Detached(oid)),
            Err(_) => Ok(Head::Branch(BranchName::try_parse(content)?)),
        }
    }

    /// Commit HEAD resolves to; `Ok(None)` in a repository without commits
    pub fn read_head_oid(&self) -> anyhow::Result<Option<ObjectId>> {
        match self.read_head()? {
            Head::Branch(name) => self.read_branch_head(&name),
            Head::Detached(oid) => Ok(Some(oid)),
        }
    }

    /// Advance whatever HEAD points at to `oid`
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        match self.read_head()? {
            Head::Branch(name) => self.update_branch_head(&name, oid),
            Head::Detached(_) => self.set_head(&Head::Detached(oid.clone())),
        }
    }

    fn read_ref_file(path: &Path) -> anyhow::Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            Ok(None)
        } else {
            Ok(Some(content.to_string()))
        }
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }
}
