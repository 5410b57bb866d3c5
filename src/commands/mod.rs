//! Command implementations
//!
//! Commands are organized into two categories:
//!
//! - `plumbing`: Low-level commands for direct object manipulation (cat-file, hash-object)
//! - `porcelain`: User-facing version control workflows (add, commit, merge, ...)
//!
//! [`Command`] is the closed set of operations a front end can request, and
//! [`Repository::execute`] runs one of them to an [`Outcome`]. No error
//! escapes that boundary.

use crate::areas::repository::Repository;
use tracing::debug;

pub mod plumbing;
pub mod porcelain;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init { author: Option<String> },
    Add { paths: Vec<String> },
    Commit { message: String },
    Log,
    Branch { name: String, author: Option<String> },
    Checkout { target: String },
    Merge { branch: String },
    CatFile { object_id: String },
    HashObject { file: String, write: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The command finished but left conflicts behind
    Conflicted { message: String },
    Failed { message: String },
}

impl Outcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Completed => 0,
            Outcome::Conflicted { .. } | Outcome::Failed { .. } => 1,
        }
    }
}

impl Repository {
    pub async fn execute(&mut self, command: Command) -> Outcome {
        match self.dispatch(command).await {
            Ok(outcome) => outcome,
            Err(error) => {
                debug!(?error, "command failed");
                let message = format!("{error:#}");
                let _ = writeln!(self.writer(), "error: {message}");

                Outcome::Failed { message }
            }
        }
    }

    async fn dispatch(&mut self, command: Command) -> anyhow::Result<Outcome> {
        if !matches!(command, Command::Init { .. }) {
            self.ensure_initialized()?;
        }

        match command {
            Command::Init { author } => self.init(author.as_deref()).await?,
            Command::Add { paths } => self.add(&paths).await?,
            Command::Commit { message } => {
                self.commit(&message).await?;
            }
            Command::Log => self.log()?,
            Command::Branch { name, author } => self.branch(&name, author.as_deref())?,
            Command::Checkout { target } => self.checkout(&target).await?,
            Command::Merge { branch } => {
                if let Some(conflict) = self.merge(&branch).await?.conflict() {
                    return Ok(Outcome::Conflicted {
                        message: conflict.to_string(),
                    });
                }
            }
            Command::CatFile { object_id } => self.cat_file(&object_id)?,
            Command::HashObject { file, write } => self.hash_object(&file, write)?,
        }

        Ok(Outcome::Completed)
    }
}
