//! Error and report types for dependency resolution.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::stage::{DeploymentRecord, StageError};

/// Condition under which the native library's artifacts are resolved.
///
/// Both cases use the same derivation; when both apply they are evaluated in turn and the
/// second pass finds everything already staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveCase {
  EditorBuild,
  WindowsPlatform,
}

impl fmt::Display for ResolveCase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ResolveCase::EditorBuild => write!(f, "editor-build"),
      ResolveCase::WindowsPlatform => write!(f, "windows-platform"),
    }
  }
}

/// Required runtime-loadable libraries were not found.
///
/// `expected` lists every path that was checked, not only the missing ones, so the message
/// points at the full expected layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
  "{} not found. Expected locations: {}",
  file_names(.expected),
  joined(.expected)
)]
pub struct MissingArtifactError {
  pub expected: Vec<PathBuf>,
  pub missing: Vec<PathBuf>,
}

fn file_names(paths: &[PathBuf]) -> String {
  paths
    .iter()
    .map(|p| p.file_name().map_or_else(|| p.display().to_string(), |n| n.to_string_lossy().into_owned()))
    .collect::<Vec<_>>()
    .join(" and/or ")
}

fn joined(paths: &[PathBuf]) -> String {
  paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}

/// Errors that abort dependency resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
  #[error(transparent)]
  MissingArtifact(#[from] MissingArtifactError),

  /// Creating the output directory or copying a library failed.
  #[error("staging failed: {0}")]
  Stage(#[from] StageError),
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
  /// Cases that applied, in evaluation order. Empty for unsupported platforms.
  pub cases: Vec<ResolveCase>,
  /// Every staging attempt, including ones that found the file already present.
  pub deployments: Vec<DeploymentRecord>,
}

impl ResolveReport {
  /// True when nothing beyond the include path was resolved.
  pub fn is_noop(&self) -> bool {
    self.cases.is_empty()
  }

  /// Number of files actually written during this resolution.
  pub fn copied_count(&self) -> usize {
    self.deployments.iter().filter(|d| d.copied).count()
  }

  /// Distinct staged destinations, in first-seen order.
  pub fn staged_files(&self) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    for record in &self.deployments {
      let destination = record.destination();
      if !files.iter().any(|f| f == &destination) {
        files.push(destination);
      }
    }
    files
  }
}
