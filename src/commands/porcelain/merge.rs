use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::errors::RepositoryError;
use crate::artifacts::merge::ancestry::CommonAncestorFinder;
use crate::artifacts::merge::merge_plan::MergePlan;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::path::PathBuf;

/// Merge commit written by `merge` and the paths it could not resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    commit_id: ObjectId,
    conflicts: Vec<PathBuf>,
}

impl MergeSummary {
    pub fn commit_id(&self) -> &ObjectId {
        &self.commit_id
    }

    pub fn conflicts(&self) -> &[PathBuf] {
        &self.conflicts
    }

    /// `MergeConflict` when some paths were left unresolved
    pub fn conflict(&self) -> Option<RepositoryError> {
        if self.conflicts.is_empty() {
            None
        } else {
            Some(RepositoryError::MergeConflict(self.conflicts.clone()))
        }
    }
}

impl Repository {
    /// Three-way merge of `branch` into the current HEAD
    ///
    /// Conflicts do not abort the merge: conflicted paths are left out of the
    /// merge commit, keep their working copy and are returned in the summary.
    pub async fn merge(&mut self, branch: &str) -> anyhow::Result<MergeSummary> {
        let head = self.refs().read_head()?;
        if let Head::Branch(current) = &head
            && current.as_ref() == branch
        {
            return Err(RepositoryError::SelfMergeRejected(branch.to_string()).into());
        }

        let incoming_branch = BranchName::try_parse(branch.to_string())
            .map_err(|_| RepositoryError::UnknownBranch(branch.to_string()))?;
        let incoming_oid = self.refs().read_branch_head(&incoming_branch)?;
        let current_oid = self.refs().read_head_oid()?;

        let no_common_ancestor = || RepositoryError::NoCommonAncestor {
            current: head.to_string(),
            incoming: branch.to_string(),
        };
        let (Some(current_oid), Some(incoming_oid)) = (current_oid, incoming_oid) else {
            return Err(no_common_ancestor().into());
        };

        let base_oid = {
            let database = self.database();
            let common_ancestor_finder =
                CommonAncestorFinder::new(|oid: &ObjectId| -> anyhow::Result<Vec<ObjectId>> {
                    Ok(database.load_commit(oid)?.parents().to_vec())
                });
            common_ancestor_finder
                .find_common_ancestor(&current_oid, &incoming_oid)?
                .ok_or_else(no_common_ancestor)?
        };

        writeln!(
            self.writer(),
            "Merging {} into {} (base {})",
            incoming_oid.to_short_oid(),
            current_oid.to_short_oid(),
            base_oid.to_short_oid()
        )?;

        let base = self.database().load_commit_snapshot(Some(&base_oid))?;
        let current = self.database().load_commit_snapshot(Some(&current_oid))?;
        let incoming = self.database().load_commit_snapshot(Some(&incoming_oid))?;
        let plan = MergePlan::build(&base, &current, &incoming);

        for path in plan.conflicts() {
            writeln!(
                self.writer(),
                "{}",
                format!("CONFLICT (content): Merge conflict in {}", path.display()).red()
            )?;
        }

        let mut parents = vec![current_oid];
        if incoming_oid != parents[0] {
            parents.push(incoming_oid);
        }

        let author = self.commit_author(&head)?;
        let message = format!("Merge branch '{}'", incoming_branch);
        let commit_id = self.write_commit(parents, plan.merged(), author, message.clone())?;

        self.restore_snapshot(plan.merged())?;

        if plan.has_conflicts() {
            writeln!(
                self.writer(),
                "Merge committed with {} conflicted file(s); their working copies were kept.",
                plan.conflicts().len()
            )?;
        } else {
            writeln!(self.writer(), "Merge made by the three-way policy.")?;
        }
        writeln!(
            self.writer(),
            "[{} {}] {}",
            head.label(),
            commit_id.to_short_oid(),
            message
        )?;

        Ok(MergeSummary {
            commit_id,
            conflicts: plan.conflicts().to_vec(),
        })
    }
}
