use crate::areas::repository::Repository;
use crate::artifacts::branch::HEAD_REF_NAME;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::RepositoryError;
use crate::artifacts::objects::commit::Author;

impl Repository {
    /// Create a branch at the commit HEAD resolves to
    pub fn branch(&mut self, branch_name: &str, author: Option<&str>) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let source_oid = self
            .refs()
            .read_head_oid()?
            .ok_or_else(|| RepositoryError::UnknownReference(HEAD_REF_NAME.to_string()))?;

        let author = match author.filter(|author| !author.trim().is_empty()) {
            Some(author) => author.to_string(),
            None => Author::identity_from_env()?,
        };

        self.refs()
            .create_branch(&branch_name, Some(&source_oid), &author)?;

        writeln!(
            self.writer(),
            "Created branch '{}' at {}",
            branch_name,
            source_oid.to_short_oid()
        )?;

        Ok(())
    }
}
