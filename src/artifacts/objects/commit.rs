//! Commit object
//!
//! A commit records a staging snapshot together with its lineage and metadata.
//!
//! ## Format
//!
//! Five `key: value` fields, one per line, in fixed order:
//!
//! ```text
//! stageSnapshot: <snapshot-id>
//! prevCommit: <parent-id>[,<parent-id>...] | none
//! timestamp: <%Y-%m-%d %H:%M:%S %z>
//! author: <identity>
//! comment: <message>
//! ```
//!
//! The commit id is the SHA-1 of exactly these bytes, so re-hashing a stored
//! record always reproduces its id.

use crate::artifacts::errors::RepositoryError;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};

/// Timestamp layout used in commit records and `MINIGIT_AUTHOR_DATE`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Parent field value of a root commit
pub const ROOT_PARENT: &str = "none";

/// Default author identity for `init`, `branch` and detached commits
pub const AUTHOR_ENV: &str = "MINIGIT_AUTHOR";

/// Fixed commit timestamp, in [`TIMESTAMP_FORMAT`]
pub const AUTHOR_DATE_ENV: &str = "MINIGIT_AUTHOR_DATE";

const UNKNOWN_AUTHOR: &str = "unknown";

const SNAPSHOT_KEY: &str = "stageSnapshot";
const PARENT_KEY: &str = "prevCommit";
const TIMESTAMP_KEY: &str = "timestamp";
const AUTHOR_KEY: &str = "author";
const COMMENT_KEY: &str = "comment";

/// Author identity and the moment the commit was authored
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    /// Create a new author stamped with the current local time
    pub fn new(name: String) -> Self {
        Author {
            name,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(name: String, timestamp: DateTime<FixedOffset>) -> Self {
        Author { name, timestamp }
    }

    /// Identity from `MINIGIT_AUTHOR`, falling back to `unknown`
    pub fn identity_from_env() -> anyhow::Result<String> {
        match std::env::var(AUTHOR_ENV) {
            Ok(name) if !name.trim().is_empty() => Self::validate_identity(&name),
            _ => Ok(UNKNOWN_AUTHOR.to_string()),
        }
    }

    /// Trimmed identity, rejected with `InvalidAuthor` when it spans several lines
    ///
    /// The identity is stored on a single line of the commit record.
    pub fn validate_identity(name: &str) -> anyhow::Result<String> {
        let name = name.trim();
        if name.contains(['\n', '\r']) {
            return Err(RepositoryError::InvalidAuthor(name.to_string()).into());
        }

        Ok(name.to_string())
    }

    /// Stamp `name` with `MINIGIT_AUTHOR_DATE` when set, the current time otherwise
    pub fn stamped_from_env(name: String) -> anyhow::Result<Self> {
        match std::env::var(AUTHOR_DATE_ENV) {
            Ok(date) => {
                let timestamp = DateTime::parse_from_str(date.trim(), TIMESTAMP_FORMAT)
                    .with_context(|| format!("Invalid MINIGIT_AUTHOR_DATE: {date}"))?;
                Ok(Author::new_with_timestamp(name, timestamp))
            }
            Err(_) => Ok(Author::new(name)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form, e.g. "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for a root commit, two for merge commits)
    parents: Vec<ObjectId>,
    snapshot_oid: ObjectId,
    author: Author,
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        snapshot_oid: ObjectId,
        author: Author,
        message: String,
    ) -> Self {
        Commit {
            parents,
            snapshot_oid,
            author,
            message,
        }
    }

    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn snapshot_oid(&self) -> &ObjectId {
        &self.snapshot_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    fn parents_field(&self) -> String {
        if self.parents.is_empty() {
            ROOT_PARENT.to_string()
        } else {
            self.parents
                .iter()
                .map(|parent| parent.as_ref())
                .collect::<Vec<_>>()
                .join(",")
        }
    }

    fn record(&self) -> String {
        [
            format!("{SNAPSHOT_KEY}: {}", self.snapshot_oid),
            format!("{PARENT_KEY}: {}", self.parents_field()),
            format!(
                "{TIMESTAMP_KEY}: {}",
                self.author.timestamp().format(TIMESTAMP_FORMAT)
            ),
            format!("{AUTHOR_KEY}: {}", self.author.name()),
            format!("{COMMENT_KEY}: {}", self.message),
        ]
        .join("\n")
            + "\n"
    }
}

fn field<'l>(line: Option<&'l str>, key: &str) -> anyhow::Result<&'l str> {
    line.with_context(|| format!("Invalid commit record: missing {key} field"))?
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix(": ").or_else(|| rest.strip_prefix(':')))
        .with_context(|| format!("Invalid commit record: malformed {key} field"))
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(Bytes::from(self.record()))
    }
}

impl Unpackable for Commit {
    fn deserialize(content: Bytes) -> anyhow::Result<Self> {
        let content = String::from_utf8(content.to_vec())?;
        let mut lines = content.lines();

        let snapshot_oid = ObjectId::try_parse(field(lines.next(), SNAPSHOT_KEY)?.to_string())?;

        let parents = match field(lines.next(), PARENT_KEY)?.trim() {
            ROOT_PARENT | "" => Vec::new(),
            parents => parents
                .split(',')
                .map(|parent| ObjectId::try_parse(parent.trim().to_string()))
                .collect::<anyhow::Result<Vec<_>>>()?,
        };

        let timestamp = field(lines.next(), TIMESTAMP_KEY)?;
        let timestamp = DateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
            .with_context(|| format!("Invalid commit record: bad timestamp {timestamp}"))?;

        let author = field(lines.next(), AUTHOR_KEY)?.to_string();

        // the comment is the last field and may span several lines
        let first_comment_line = field(lines.next(), COMMENT_KEY)?;
        let message = std::iter::once(first_comment_line)
            .chain(lines)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(Self::new(
            parents,
            snapshot_oid,
            Author::new_with_timestamp(author, timestamp),
            message,
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.record()
    }
}
