use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::snapshot::Snapshot;
use tracing::info;

impl Repository {
    /// Persist `snapshot` and a commit on top of `parents`, then advance HEAD
    ///
    /// The commit is stored before HEAD moves. A crash between the two steps
    /// leaves an unreferenced commit in the store and HEAD unchanged.
    pub fn write_commit(
        &self,
        parents: Vec<ObjectId>,
        snapshot: &Snapshot,
        author: Author,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let snapshot_id = self.database().store(snapshot)?;

        let commit = Commit::new(parents, snapshot_id, author, message);
        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;

        info!(
            oid = %commit_id,
            parents = commit.parents().len(),
            entries = snapshot.len(),
            "wrote commit"
        );

        Ok(commit_id)
    }
}
