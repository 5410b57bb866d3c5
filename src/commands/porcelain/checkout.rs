use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::snapshot::Snapshot;
use tracing::debug;

const DETACHMENT_NOTICE: &str = r#"
You are in 'detached HEAD' state. You can look around, make experimental
changes and commit them, and you can discard any commits you make in this
state without impacting any branches by performing another checkout.

If you want to create a new branch to retain commits you create, you may
do so (now or later) by using the branch command. Example:

    minigit branch <new-branch-name>
"#;

impl Repository {
    pub async fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        let current_head = self.refs().read_head()?;

        let target_revision = Revision::try_parse(target)?;
        let target_ref = target_revision.resolve(self)?;
        let target_oid = target_ref.commit_id().cloned();
        let snapshot = self
            .database()
            .load_commit_snapshot(target_oid.as_ref())?;

        // HEAD only moves once every file of the target is in place
        let new_head = target_ref.as_head();
        self.restore_snapshot(&snapshot)?;
        self.refs().set_head(&new_head)?;
        if new_head.is_detached() && new_head != current_head {
            self.discard_detached_stage(&new_head).await?;
        }

        self.print_previous_head(&current_head, target_oid.as_ref())?;
        self.print_detachment_notice(&current_head, &new_head, target)?;
        self.print_new_head(&current_head, &new_head)?;

        Ok(())
    }

    /// Empty the staging area shared by every detached HEAD
    ///
    /// Entries staged at another commit must not be committed on top of the
    /// newly checked out one.
    async fn discard_detached_stage(&self, detached_head: &Head) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;

        index.rehydrate(detached_head)?;
        if !index.is_empty() {
            debug!(head = %detached_head, "discarded detached staging area");
        }
        index.clear();
        index.write_updates()
    }

    /// Write every file of `snapshot` into the working directory
    ///
    /// Files outside the snapshot are left untouched.
    pub(crate) fn restore_snapshot(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        for (path, blob_id) in snapshot.entries() {
            let blob = self.database().load_blob(blob_id)?;
            self.workspace().write_file(path, blob.content())?;
            debug!(path = %path.display(), oid = %blob_id, "restored file");
        }

        Ok(())
    }

    fn print_previous_head(
        &self,
        current_head: &Head,
        target_oid: Option<&ObjectId>,
    ) -> anyhow::Result<()> {
        if let Head::Detached(current_oid) = current_head
            && Some(current_oid) != target_oid
        {
            self.print_head_position("Previous HEAD position was", current_oid)?;
        }

        Ok(())
    }

    fn print_detachment_notice(
        &self,
        current_head: &Head,
        new_head: &Head,
        target: &str,
    ) -> anyhow::Result<()> {
        if !current_head.is_detached() && new_head.is_detached() {
            writeln!(
                self.writer(),
                "Note: checking out '{}'.\n{}",
                target,
                DETACHMENT_NOTICE
            )?;
        }

        Ok(())
    }

    fn print_new_head(&self, current_head: &Head, new_head: &Head) -> anyhow::Result<()> {
        match new_head {
            Head::Detached(oid) => self.print_head_position("HEAD is now at", oid)?,
            Head::Branch(name) if new_head == current_head => {
                writeln!(self.writer(), "Already on '{}'", name)?
            }
            Head::Branch(name) => writeln!(self.writer(), "Switched to branch '{}'", name)?,
        }

        Ok(())
    }

    fn print_head_position(&self, message: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let commit = self.database().load_commit(oid)?;

        writeln!(
            self.writer(),
            "{} {} {}",
            message,
            oid.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
