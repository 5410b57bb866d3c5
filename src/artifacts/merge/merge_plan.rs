use crate::artifacts::merge::resolution::{Resolution, resolve_file};
use crate::artifacts::objects::snapshot::Snapshot;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Result of merging the snapshots of two commits against their common ancestor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    merged: Snapshot,
    conflicts: Vec<PathBuf>,
}

impl MergePlan {
    /// Resolve every path present in any of the three snapshots
    ///
    /// Conflicting paths are left out of the merged snapshot and listed in
    /// path order.
    pub fn build(base: &Snapshot, current: &Snapshot, incoming: &Snapshot) -> Self {
        let paths = base
            .paths()
            .chain(current.paths())
            .chain(incoming.paths())
            .collect::<BTreeSet<_>>();

        let mut plan = MergePlan::default();
        for path in paths {
            match resolve_file(base.get(path), current.get(path), incoming.get(path)) {
                Resolution::Resolved(Some(oid)) => {
                    debug!(path = %path.display(), %oid, "resolved path");
                    plan.merged.insert(path.clone(), oid);
                }
                Resolution::Resolved(None) => {}
                Resolution::Conflict => {
                    warn!(path = %path.display(), "merge conflict");
                    plan.conflicts.push(path.clone());
                }
            }
        }

        plan
    }

    pub fn merged(&self) -> &Snapshot {
        &self.merged
    }

    pub fn conflicts(&self) -> &[PathBuf] {
        &self.conflicts
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}
