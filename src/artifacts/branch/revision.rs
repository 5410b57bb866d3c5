use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, is_valid_ref_name};
use crate::artifacts::branch::{ANCESTOR_REGEX, HEAD_REF_NAME, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::errors::RepositoryError;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;

/// A user-supplied target naming a branch or a commit.
///
/// Supports multiple formats:
/// - Branch names: `master`, `feature/login`
/// - `HEAD` and its alias `@`
/// - Full commit ids (40 hex characters)
/// - Abbreviated commit ids (at least 4 hex characters, unique prefix)
/// - Parent notation: `<revision>^`
/// - Ancestor notation: `<revision>~<n>`
///
/// Hex-looking names are parsed as `Ref` and only tried as commit ids when no
/// branch of that name exists, so branches always win over ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    Ref(String),
    /// The Nth first-parent ancestor of a revision (e.g. HEAD~3)
    Ancestor(Box<Revision>, usize),
    /// The first parent of a revision (e.g. HEAD^)
    Parent(Box<Revision>),
}

/// What a revision resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// An existing branch; `head` is `None` until its first commit
    Branch {
        name: BranchName,
        head: Option<ObjectId>,
    },
    /// A commit addressed directly
    Commit(ObjectId),
}

impl Reference {
    pub fn commit_id(&self) -> Option<&ObjectId> {
        match self {
            Reference::Branch { head, .. } => head.as_ref(),
            Reference::Commit(oid) => Some(oid),
        }
    }

    /// HEAD value selecting this reference: attached for branches, detached for commits
    pub fn as_head(&self) -> Head {
        match self {
            Reference::Branch { name, .. } => Head::Branch(name.clone()),
            Reference::Commit(oid) => Head::Detached(oid.clone()),
        }
    }
}

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent_regex = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        let ancestor_regex = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;

        if let Some(caps) = parent_regex.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ancestor_regex.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .with_context(|| format!("failed to parse generations in revision: {revision}"))?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            if !is_valid_ref_name(resolved_name)? {
                return Err(RepositoryError::UnknownReference(revision.to_string()).into());
            }

            Ok(Revision::Ref(resolved_name.to_string()))
        }
    }

    /// Resolve to a branch or a commit
    ///
    /// Parent and ancestor notations always yield a commit.
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<Reference> {
        match self {
            Revision::Ref(name) => Self::resolve_ref(name, repository),
            Revision::Parent(base_revision) => {
                let oid = Self::resolve_commit(base_revision, repository)?;
                Ok(Reference::Commit(self.first_parent(&oid, repository)?))
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = Self::resolve_commit(base_revision, repository)?;
                for _ in 0..*generations {
                    oid = self.first_parent(&oid, repository)?;
                }

                Ok(Reference::Commit(oid))
            }
        }
    }

    fn resolve_commit(revision: &Revision, repository: &Repository) -> anyhow::Result<ObjectId> {
        revision
            .resolve(repository)?
            .commit_id()
            .cloned()
            .ok_or_else(|| RepositoryError::UnknownReference(revision.to_string()).into())
    }

    fn first_parent(&self, oid: &ObjectId, repository: &Repository) -> anyhow::Result<ObjectId> {
        repository
            .database()
            .load_commit(oid)?
            .parent()
            .cloned()
            .ok_or_else(|| RepositoryError::UnknownReference(self.to_string()).into())
    }

    fn resolve_ref(name: &str, repository: &Repository) -> anyhow::Result<Reference> {
        let refs = repository.refs();

        if name == HEAD_REF_NAME {
            return match refs.read_head()? {
                Head::Branch(name) => {
                    let head = refs.read_branch_head(&name)?;
                    Ok(Reference::Branch { name, head })
                }
                Head::Detached(oid) => Ok(Reference::Commit(oid)),
            };
        }

        if let Ok(branch) = BranchName::try_parse(name.to_string())
            && refs.branch_exists(&branch)
        {
            let head = refs.read_branch_head(&branch)?;
            return Ok(Reference::Branch { name: branch, head });
        }

        if ObjectId::is_valid_prefix(name) {
            return Self::resolve_oid(name, repository).map(Reference::Commit);
        }

        Err(RepositoryError::UnknownReference(name.to_string()).into())
    }

    fn resolve_oid(prefix: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        let database = repository.database();

        if prefix.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(prefix.to_string())?;
            if database.contains(ObjectType::Commit, &oid) {
                return Ok(oid);
            }

            return Err(RepositoryError::UnknownReference(prefix.to_string()).into());
        }

        let mut matches = database.find_objects_by_prefix(ObjectType::Commit, prefix)?;
        match matches.len() {
            0 => Err(RepositoryError::UnknownReference(prefix.to_string()).into()),
            1 => Ok(matches.remove(0)),
            candidates => Err(RepositoryError::AmbiguousReference {
                prefix: prefix.to_string(),
                candidates,
            }
            .into()),
        }
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::Ref(name) => write!(f, "{name}"),
            Revision::Parent(base) => write!(f, "{base}^"),
            Revision::Ancestor(base, generations) => write!(f, "{base}~{generations}"),
        }
    }
}
