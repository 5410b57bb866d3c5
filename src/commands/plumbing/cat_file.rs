use crate::areas::repository::Repository;
use crate::artifacts::errors::RepositoryError;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;

impl Repository {
    /// Print the stored bytes of a blob, snapshot or commit record
    pub fn cat_file(&mut self, object_id: &str) -> anyhow::Result<()> {
        let object_id = ObjectId::try_parse(object_id.to_string())
            .map_err(|_| RepositoryError::ObjectNotFound(object_id.to_string()))?;

        let object_type = [ObjectType::Commit, ObjectType::Blob]
            .into_iter()
            .find(|object_type| self.database().contains(*object_type, &object_id))
            .ok_or_else(|| RepositoryError::ObjectNotFound(object_id.to_string()))?;
        let object_data = self.database().load(object_type, &object_id)?;

        self.writer().write_all(&object_data)?;

        Ok(())
    }
}
