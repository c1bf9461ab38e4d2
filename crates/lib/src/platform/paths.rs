use std::path::{Component, Path, PathBuf};

use crate::consts::{BINARIES_DIR, MODULE_DEPTH, PLUGIN_BASE_ENV};

use super::TargetPlatform;

/// Returns the plugin base directory for a third-party module root.
///
/// `NATSTAGE_PLUGIN_BASE` takes precedence; otherwise the base is derived by walking
/// [`MODULE_DEPTH`] levels up from the module root.
pub fn plugin_base_dir(module_root: &Path) -> PathBuf {
  if let Ok(path) = std::env::var(PLUGIN_BASE_ENV)
    && !path.is_empty()
  {
    return PathBuf::from(path);
  }

  derive_plugin_base(module_root, MODULE_DEPTH)
}

/// Resolve `module_root` to a full path and walk `depth` levels up.
///
/// Existing roots are canonicalized; roots that do not exist yet are made absolute and
/// have `.`/`..` folded lexically.
pub fn derive_plugin_base(module_root: &Path, depth: usize) -> PathBuf {
  let mut base = match dunce::canonicalize(module_root) {
    Ok(path) => path,
    Err(_) => normalize(&std::path::absolute(module_root).unwrap_or_else(|_| module_root.to_path_buf())),
  };

  for _ in 0..depth {
    if !base.pop() {
      break;
    }
  }
  base
}

/// Directory the runtime libraries for `platform` are staged into.
pub fn binaries_dir(plugin_base: &Path, platform: &TargetPlatform) -> PathBuf {
  plugin_base.join(BINARIES_DIR).join(platform.as_segment())
}

fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        out.pop();
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}
