//! Data structures and algorithms
//!
//! - `branch`: Branch names and revision resolution
//! - `errors`: Repository error kinds
//! - `merge`: Common ancestor discovery and three-way merge
//! - `objects`: Stored object types (blob, snapshot, commit)

pub mod branch;
pub mod errors;
pub mod merge;
pub mod objects;
