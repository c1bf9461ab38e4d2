use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::MANIFEST_FILENAME;

/// Errors that can occur while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("failed to read manifest '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse manifest '{path}': {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  /// The manifest parsed but describes an unusable layout.
  #[error("invalid manifest: {0}")]
  Invalid(String),
}

/// File layout of one vendored native library, relative to its module root.
///
/// ```text
/// <module_root>/
///   <include_dir>/
///   <platform>/<lib_dir>/<import_library>
///   <platform>/<bin_dir>/<loadable_libraries...>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryManifest {
  pub include_dir: String,
  pub lib_dir: String,
  pub bin_dir: String,
  pub import_library: String,
  /// Runtime-loadable libraries in staging order: the library itself, then its helpers.
  pub loadable_libraries: Vec<String>,
  /// Capability symbol defined as `<definition>=1` for downstream code.
  pub definition: String,
}

impl Default for LibraryManifest {
  fn default() -> Self {
    Self {
      include_dir: "include".to_string(),
      lib_dir: "lib".to_string(),
      bin_dir: "bin".to_string(),
      import_library: "ssh.lib".to_string(),
      loadable_libraries: vec!["ssh.dll".to_string(), "pthreadVC3.dll".to_string()],
      definition: "WITH_LIBSSH".to_string(),
    }
  }
}

impl LibraryManifest {
  /// Load and validate a manifest from a JSON file.
  pub fn load(path: &Path) -> Result<Self, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let manifest: Self = serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    manifest.validate()?;
    Ok(manifest)
  }

  /// Load `<module_root>/natstage.json`, or fall back to the defaults when it is absent.
  pub fn for_module(module_root: &Path) -> Result<Self, ManifestError> {
    let path = module_root.join(MANIFEST_FILENAME);
    if !path.exists() {
      debug!(module = %module_root.display(), "no manifest found, using defaults");
      return Ok(Self::default());
    }

    debug!(path = %path.display(), "loading manifest");
    Self::load(&path)
  }

  /// Check that every configured name is usable as a single path segment.
  pub fn validate(&self) -> Result<(), ManifestError> {
    if self.loadable_libraries.is_empty() {
      return Err(ManifestError::Invalid("no loadable libraries listed".to_string()));
    }
    if self.definition.trim().is_empty() {
      return Err(ManifestError::Invalid("definition name is empty".to_string()));
    }

    let names = [
      ("include_dir", &self.include_dir),
      ("lib_dir", &self.lib_dir),
      ("bin_dir", &self.bin_dir),
      ("import_library", &self.import_library),
    ]
    .into_iter()
    .chain(self.loadable_libraries.iter().map(|name| ("loadable_libraries", name)));

    for (field, name) in names {
      if !is_single_segment(name) {
        return Err(ManifestError::Invalid(format!(
          "{field} '{name}' must be a single path component"
        )));
      }
    }

    Ok(())
  }
}

fn is_single_segment(name: &str) -> bool {
  let mut components = Path::new(name).components();
  matches!(
    (components.next(), components.next()),
    (Some(Component::Normal(_)), None)
  ) && !name.contains(['/', '\\'])
}
