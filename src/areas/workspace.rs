use crate::areas::repository::METADATA_DIR;
use crate::artifacts::errors::RepositoryError;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never tracked by the repository
const IGNORED_PATHS: [&str; 3] = [METADATA_DIR, ".", ".."];

/// Working directory rooted at the repository root
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Expand a user-supplied path into the repository-relative files it names
    ///
    /// Directories are walked recursively; the metadata directory is skipped.
    /// Paths a staging file cannot hold verbatim (non UTF-8, line breaks) and
    /// paths naming the metadata directory fail with `UntrackablePath`.
    pub fn list_files(&self, target: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let absolute = if target.is_absolute() {
            target.to_path_buf()
        } else {
            self.path.join(target)
        };

        if !absolute.exists() {
            return Err(RepositoryError::FileNotFound(target.to_path_buf()).into());
        }

        let absolute = absolute
            .canonicalize()
            .with_context(|| format!("Unable to resolve path {}", target.display()))?;
        if !absolute.starts_with(&self.path) {
            anyhow::bail!(
                "{} is outside repository at {}",
                target.display(),
                self.path.display()
            );
        }

        if let Some(relative) = self.relative_path(&absolute)
            && Self::is_metadata(&relative)
        {
            return Err(RepositoryError::UntrackablePath {
                path: relative,
                reason: "it belongs to the repository metadata".to_string(),
            }
            .into());
        }

        if absolute.is_dir() {
            let mut files = WalkDir::new(&absolute)
                .into_iter()
                .filter_entry(|entry| !Self::is_ignored(entry.path()))
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().is_file())
                .filter_map(|entry| self.relative_path(entry.path()))
                .map(Self::trackable)
                .collect::<anyhow::Result<Vec<_>>>()?;
            files.sort();

            Ok(files)
        } else {
            self.relative_path(&absolute)
                .map(Self::trackable)
                .into_iter()
                .collect()
        }
    }

    fn is_metadata(relative: &Path) -> bool {
        matches!(
            relative.components().next(),
            Some(Component::Normal(name)) if name == METADATA_DIR
        )
    }

    /// Reject paths the line-based staging format cannot round-trip
    fn trackable(relative: PathBuf) -> anyhow::Result<PathBuf> {
        let reason = match relative.to_str() {
            None => "it is not valid UTF-8",
            Some(name) if name.contains(['\n', '\r']) => "it contains a line break",
            Some(_) => return Ok(relative),
        };

        Err(RepositoryError::UntrackablePath {
            path: relative,
            reason: reason.to_string(),
        }
        .into())
    }

    fn is_ignored(path: &Path) -> bool {
        path.file_name()
            .map(|name| IGNORED_PATHS.contains(&name.to_string_lossy().as_ref()))
            .unwrap_or(false)
    }

    fn relative_path(&self, path: &Path) -> Option<PathBuf> {
        path.strip_prefix(self.path.as_ref())
            .ok()
            .map(Path::to_path_buf)
            .filter(|relative| !relative.as_os_str().is_empty())
    }

    /// Read a tracked file, failing with `FileNotFound` or `HashFailure`
    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let absolute = self.path.join(file_path);

        if !absolute.exists() {
            return Err(RepositoryError::FileNotFound(file_path.to_path_buf()).into());
        }

        std::fs::read(&absolute).map(Bytes::from).map_err(|error| {
            RepositoryError::HashFailure {
                path: file_path.to_path_buf(),
                reason: error.to_string(),
            }
            .into()
        })
    }

    /// Write `data` to a repository-relative path, creating parent directories
    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let absolute = self.path.join(file_path);

        if let Some(parent) = absolute.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create parent directories for {:?}", file_path)
            })?;
        }

        if absolute.is_dir() {
            std::fs::remove_dir_all(&absolute).with_context(|| {
                format!("Failed to remove existing directory: {:?}", file_path)
            })?;
        }

        std::fs::write(&absolute, data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))
    }
}
