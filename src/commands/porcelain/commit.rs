use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::errors::RepositoryError;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        let head = self.refs().read_head()?;
        let parent = self.refs().read_head_oid()?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the staging area of the current HEAD from the disk
        index.rehydrate(&head)?;

        if index.is_empty() {
            return Err(RepositoryError::EmptyStage.into());
        }

        let base = self.database().load_commit_snapshot(parent.as_ref())?;
        let snapshot = index.snapshot(base);
        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };

        let author = self.commit_author(&head)?;
        let message = message.trim().to_string();
        let commit_id =
            self.write_commit(parent.into_iter().collect(), &snapshot, author, message.clone())?;

        index.clear();
        index.write_updates()?;

        writeln!(
            self.writer(),
            "[{} {}{}] {}",
            head.label(),
            is_root,
            commit_id.to_short_oid(),
            message.lines().next().unwrap_or_default()
        )?;

        Ok(commit_id)
    }

    /// Author of the next commit on `head`
    ///
    /// Branches commit as the identity recorded when they were created; a
    /// detached HEAD commits as `MINIGIT_AUTHOR`.
    pub(crate) fn commit_author(&self, head: &Head) -> anyhow::Result<Author> {
        let recorded = match head {
            Head::Branch(name) => self.refs().read_author(name)?,
            Head::Detached(_) => None,
        };
        let name = match recorded {
            Some(name) => name,
            None => Author::identity_from_env()?,
        };

        Author::stamped_from_env(name)
    }
}
