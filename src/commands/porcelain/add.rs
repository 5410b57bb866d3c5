use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use std::path::Path;
use tracing::debug;

impl Repository {
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let head = self.refs().read_head()?;
        let committed = self
            .database()
            .load_commit_snapshot(self.refs().read_head_oid()?.as_ref())?;

        // Expand directories before touching the staging area, so that an
        // unknown path stages nothing at all
        let files = paths
            .iter()
            .map(|path| self.workspace().list_files(Path::new(path)))
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .flatten();

        let index = self.index();
        let mut index = index.lock().await;

        // Load the staging area of the current HEAD from the disk
        index.rehydrate(&head)?;

        for path in files {
            let data = self.workspace().read_file(&path)?;
            let blob_id = self.database().store(&Blob::new(data))?;

            let outcome = index.record(path.clone(), blob_id, committed.get(&path));
            debug!(path = %path.display(), %outcome, "staged file");
            writeln!(self.writer(), "{outcome}: {}", path.display())?;
        }

        index.write_updates()?;

        Ok(())
    }
}
