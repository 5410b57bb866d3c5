//! Merge algorithms
//!
//! - `ancestry`: lowest common ancestor discovery over the commit DAG
//! - `resolution`: the per-file three-way policy
//! - `merge_plan`: applies the policy to whole snapshots

pub mod ancestry;
pub mod merge_plan;
pub mod resolution;
