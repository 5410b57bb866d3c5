//! Plumbing commands
//!
//! Low-level building blocks working directly on the object store:
//!
//! - `cat_file`: print a stored object
//! - `hash_object`: compute (and optionally store) a file's blob id
//! - `write_commit`: persist a snapshot and commit, then advance HEAD

pub mod cat_file;
pub mod hash_object;
pub mod write_commit;
