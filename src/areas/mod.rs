//! Core repository components
//!
//! - `database`: Content-addressed store for blobs, snapshots and commits
//! - `index`: Per-branch staging areas
//! - `refs`: Branch heads, branch authors and HEAD
//! - `repository`: Coordination of the areas behind every command
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
