use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::RepositoryError;
use crate::artifacts::objects::commit::Author;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::fs;

impl Repository {
    pub async fn init(&mut self, author: Option<&str>) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(RepositoryError::AlreadyInitialized(self.path().to_path_buf()).into());
        }

        // a rejected author must leave no metadata directory behind
        let author = match author.filter(|author| !author.trim().is_empty()) {
            Some(author) => Author::validate_identity(author)?,
            None => Author::identity_from_env()?,
        };

        for object_type in [ObjectType::Blob, ObjectType::Commit] {
            fs::create_dir_all(self.database().namespace_path(object_type)).with_context(
                || format!("Failed to create .minigit/{} directory", object_type.namespace()),
            )?;
        }

        fs::create_dir_all(self.refs().refs_path())
            .context("Failed to create .minigit/refs directory")?;

        fs::create_dir_all(self.refs().authors_path())
            .context("Failed to create .minigit/authors directory")?;

        {
            let index = self.index();
            let index = index.lock().await;
            fs::create_dir_all(index.path().join("heads"))
                .context("Failed to create .minigit/staging directory")?;
        }

        let default_branch = BranchName::default_branch();

        self.refs()
            .create_branch(&default_branch, None, &author)
            .context("Failed to create default branch")?;
        self.refs()
            .set_head(&Head::Branch(default_branch))
            .context("Failed to create initial HEAD reference")?;

        writeln!(
            self.writer(),
            "Initialized empty minigit repository in {}",
            self.metadata_path().display()
        )?;

        Ok(())
    }
}
