use crate::artifacts::branch::{DEFAULT_BRANCH, HEAD_REF_NAME, INVALID_BRANCH_NAME_REGEX};
use crate::artifacts::errors::RepositoryError;
use anyhow::Context;

/// Validated branch name
///
/// Follows git's ref-name rules, and additionally reserves `HEAD` so that a
/// branch can never shadow the HEAD pointer file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() || name == HEAD_REF_NAME || !is_valid_ref_name(&name)? {
            return Err(RepositoryError::InvalidBranchName(name).into());
        }

        Ok(Self(name))
    }

    pub fn default_branch() -> Self {
        Self(DEFAULT_BRANCH.to_string())
    }
}

/// Whether `name` is acceptable as a ref name (branch or `HEAD`)
pub fn is_valid_ref_name(name: &str) -> anyhow::Result<bool> {
    let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
        .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

    Ok(!name.is_empty() && !re.is_match(name))
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
