//! Common ancestor discovery
//!
//! The merge base of two commits is found in two breadth-first passes:
//!
//! 1. Walk every ancestor of the current commit (all parents, each commit
//!    once) and remember them in a visited set.
//! 2. Walk breadth-first from the incoming commit and return the first commit
//!    already in that set.
//!
//! When a DAG has several minimal common ancestors (criss-cross merges), the
//! one reached first by the incoming side's breadth-first order is reported.
//!
//! The finder is generic over a parent loader so that it runs the same way on
//! the object database and on in-memory graphs.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

pub struct CommonAncestorFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parents_loader: ParentsLoaderFn,
}

impl<ParentsLoaderFn> CommonAncestorFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    /// `parents_loader` returns the ordered parents of a commit (empty for a root)
    pub fn new(parents_loader: ParentsLoaderFn) -> Self {
        Self { parents_loader }
    }

    /// Every commit reachable from `commit_id`, itself included
    pub fn ancestors(&self, commit_id: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut visited = HashSet::new();
        self.walk(commit_id, |commit| {
            visited.insert(commit.clone());
            false
        })?;

        Ok(visited)
    }

    /// Lowest common ancestor of `current` and `incoming`, if their histories meet
    pub fn find_common_ancestor(
        &self,
        current: &ObjectId,
        incoming: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let current_ancestors = self.ancestors(current)?;
        debug!(
            %current,
            ancestors = current_ancestors.len(),
            "collected ancestors of current commit"
        );

        let mut common_ancestor = None;
        self.walk(incoming, |commit| {
            if current_ancestors.contains(commit) {
                common_ancestor = Some(commit.clone());
                true
            } else {
                false
            }
        })?;

        debug!(%current, %incoming, base = ?common_ancestor, "resolved common ancestor");
        Ok(common_ancestor)
    }

    /// Breadth-first walk from `start`, visiting each commit once, until `visit` returns true
    fn walk(
        &self,
        start: &ObjectId,
        mut visit: impl FnMut(&ObjectId) -> bool,
    ) -> anyhow::Result<()> {
        let mut seen = HashSet::from([start.clone()]);
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            if visit(&commit_id) {
                return Ok(());
            }

            for parent_id in (self.parents_loader)(&commit_id)? {
                if seen.insert(parent_id.clone()) {
                    queue.push_back(parent_id);
                }
            }
        }

        Ok(())
    }
}
