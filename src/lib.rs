//! minigit: a minimal version-control engine
//!
//! - `areas`: storage areas under `.minigit` (objects, refs, staging, working tree)
//! - `artifacts`: value types and algorithms (objects, branch names, merge)
//! - `commands`: the typed command surface run by [`areas::repository::Repository`]

pub mod areas;
pub mod artifacts;
pub mod commands;
