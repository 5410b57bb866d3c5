//! Porcelain commands
//!
//! User-facing operations composed from the storage areas and the plumbing
//! commands.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files on the current HEAD
//! - `commit`: Record the staged files as a new commit
//! - `log`: Show first-parent history from HEAD
//! - `branch`: Create a branch at HEAD
//! - `checkout`: Switch branches or detach at a commit, restoring its files
//! - `merge`: Three-way merge of a branch into HEAD

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
