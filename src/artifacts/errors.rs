//! Repository error kinds
//!
//! Every core operation returns `anyhow::Result`. When a failure is one of the
//! well-known kinds below it is raised as a [`RepositoryError`] so callers can
//! recover the kind with `downcast_ref::<RepositoryError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("not a minigit repository (missing .minigit directory in {0})")]
    NotARepository(PathBuf),

    #[error("repository already initialized in {0}")]
    AlreadyInitialized(PathBuf),

    #[error("pathspec '{0}' did not match any files")]
    FileNotFound(PathBuf),

    #[error("cannot track {path:?}: {reason}")]
    UntrackablePath { path: PathBuf, reason: String },

    #[error("unable to hash file {path}: {reason}")]
    HashFailure { path: PathBuf, reason: String },

    #[error("object {0} not found")]
    ObjectNotFound(String),

    #[error("snapshot {0} is empty or missing")]
    EmptyOrMissingSnapshot(String),

    #[error("reference '{0}' did not match any branch or commit")]
    UnknownReference(String),

    #[error("short commit id '{prefix}' is ambiguous ({candidates} candidates)")]
    AmbiguousReference { prefix: String, candidates: usize },

    #[error("branch '{0}' not found")]
    UnknownBranch(String),

    #[error("invalid branch name '{0}'")]
    InvalidBranchName(String),

    #[error("branch '{0}' already exists")]
    BranchExists(String),

    #[error("invalid author identity {0:?}: must be a single line")]
    InvalidAuthor(String),

    #[error("nothing staged to commit")]
    EmptyStage,

    #[error("commit {0} is corrupt or missing")]
    CorruptCommit(String),

    #[error("cannot merge branch '{0}' into itself")]
    SelfMergeRejected(String),

    #[error("no common ancestor between {current} and {incoming}")]
    NoCommonAncestor { current: String, incoming: String },

    #[error("merge conflict in {} file(s)", .0.len())]
    MergeConflict(Vec<PathBuf>),
}

/// Return the repository error kind carried by `error`, if any.
pub fn error_kind(error: &anyhow::Error) -> Option<&RepositoryError> {
    error.downcast_ref::<RepositoryError>()
}
