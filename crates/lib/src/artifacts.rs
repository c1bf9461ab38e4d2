//! Platform-qualified artifact paths.
//!
//! An [`ArtifactSet`] is a pure function of the module root, the target platform and the
//! library manifest. Nothing here touches the filesystem except [`ArtifactSet::missing_loadables`].

use std::path::{Path, PathBuf};

use crate::manifest::LibraryManifest;
use crate::platform::TargetPlatform;

/// The files one platform needs from a vendored native library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
  pub include_dir: PathBuf,
  pub import_library: PathBuf,
  /// Library first, then its helpers, in the manifest's order.
  pub loadable_libraries: Vec<PathBuf>,
}

impl ArtifactSet {
  pub fn derive(module_root: &Path, platform: &TargetPlatform, manifest: &LibraryManifest) -> Self {
    let platform_dir = module_root.join(platform.as_segment());
    let bin_dir = platform_dir.join(&manifest.bin_dir);

    Self {
      include_dir: module_root.join(&manifest.include_dir),
      import_library: platform_dir.join(&manifest.lib_dir).join(&manifest.import_library),
      loadable_libraries: manifest.loadable_libraries.iter().map(|name| bin_dir.join(name)).collect(),
    }
  }

  /// Loadable libraries that are not present on disk.
  pub fn missing_loadables(&self) -> Vec<&Path> {
    self
      .loadable_libraries
      .iter()
      .map(PathBuf::as_path)
      .filter(|path| !path.is_file())
      .collect()
  }
}
