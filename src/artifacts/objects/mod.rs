//! Stored object types
//!
//! Everything the repository persists is addressed by the SHA-1 of its
//! serialized bytes:
//!
//! - **Blob**: raw file content
//! - **Snapshot**: the path → blob mapping a commit captures (stored as a blob)
//! - **Commit**: five-field record pointing at a snapshot and its parents

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod snapshot;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Shortest abbreviated id accepted when resolving references
pub const MIN_PREFIX_LENGTH: usize = 4;
