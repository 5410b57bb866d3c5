//! Per-file three-way merge policy
//!
//! Each side is the blob id a path maps to in the ancestor, current and
//! incoming snapshots, or `None` when the path is absent there. The rules are
//! evaluated in this order:
//!
//! | # | condition                                   | result          |
//! |---|---------------------------------------------|-----------------|
//! | 1 | current == incoming, or incoming is absent  | keep current    |
//! | 2 | current is absent                           | take incoming   |
//! | 3 | base == current                             | take incoming   |
//! | 4 | base == incoming                            | keep current    |
//! | 5 | otherwise                                   | conflict        |
//!
//! Rule 1 runs first, so a file deleted on the incoming side is never removed
//! from the current side.

/// Outcome of merging one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// The merged snapshot maps the path to this side (`None` keeps it absent)
    Resolved(Option<T>),
    /// Both sides changed the path differently from the ancestor
    Conflict,
}

pub fn resolve_file<T: Eq + Clone>(
    base: Option<&T>,
    current: Option<&T>,
    incoming: Option<&T>,
) -> Resolution<T> {
    if current == incoming || incoming.is_none() {
        return Resolution::Resolved(current.cloned());
    }

    if current.is_none() || base == current {
        return Resolution::Resolved(incoming.cloned());
    }

    if base == incoming {
        return Resolution::Resolved(current.cloned());
    }

    Resolution::Conflict
}
