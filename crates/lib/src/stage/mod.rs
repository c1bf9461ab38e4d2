//! Idempotent staging of runtime libraries.
//!
//! Staging copies a loadable library into the plugin's platform-named binaries directory.
//! An existing entry with the same name, even a dangling symlink, marks the library as
//! already staged and is never overwritten, so repeated configuration passes perform no writes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while staging a file.
#[derive(Debug, Error)]
pub enum StageError {
  #[error("failed to create directory '{path}': {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to copy '{from}' to '{to}': {source}")]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("source path '{0}' has no file name")]
  NoFileName(PathBuf),
}

/// One loadable library placed (or found already placed) in an output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRecord {
  pub source: PathBuf,
  pub destination_dir: PathBuf,
  pub file_name: String,
  /// False when the destination already existed and nothing was written.
  pub copied: bool,
}

impl DeploymentRecord {
  pub fn destination(&self) -> PathBuf {
    self.destination_dir.join(&self.file_name)
  }
}

/// Copy `source` into `destination_dir` unless a file of the same name is already there.
///
/// The destination directory is created if absent. Other files in it are left untouched.
pub fn stage_file(source: &Path, destination_dir: &Path) -> Result<DeploymentRecord, StageError> {
  let file_name = source
    .file_name()
    .ok_or_else(|| StageError::NoFileName(source.to_path_buf()))?
    .to_string_lossy()
    .into_owned();

  if !destination_dir.is_dir() {
    fs::create_dir_all(destination_dir).map_err(|source| StageError::CreateDir {
      path: destination_dir.to_path_buf(),
      source,
    })?;
  }

  let destination = destination_dir.join(&file_name);
  // Any entry counts as staged, including a symlink whose target is gone.
  let copied = if fs::symlink_metadata(&destination).is_ok() {
    debug!(file = %file_name, dest = %destination_dir.display(), "already staged");
    false
  } else {
    fs::copy(source, &destination).map_err(|e| StageError::Copy {
      from: source.to_path_buf(),
      to: destination.clone(),
      source: e,
    })?;
    info!(file = %file_name, dest = %destination_dir.display(), "staged runtime library");
    true
  };

  Ok(DeploymentRecord {
    source: source.to_path_buf(),
    destination_dir: destination_dir.to_path_buf(),
    file_name,
    copied,
  })
}
