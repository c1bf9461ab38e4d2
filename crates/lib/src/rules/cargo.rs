//! Cargo build script adapter.
//!
//! Lets a `build.rs` consume a resolved [`BuildConfig`]:
//!
//! ```no_run
//! use natstage_lib::rules::cargo::LinkerFlavor;
//! use natstage_lib::{BuildTarget, Resolver};
//!
//! let target = BuildTarget::from_target_triple(&std::env::var("TARGET").unwrap(), false).unwrap();
//! let resolver = Resolver::for_module("vendor/libssh").unwrap();
//! let config = resolver.resolve_config(&target).unwrap();
//! config
//!   .write_cargo_directives(LinkerFlavor::from_cargo_env(), &mut std::io::stdout())
//!   .unwrap();
//! ```
//!
//! Delay loading is an MSVC linker feature; other linkers only get the directives they
//! understand.

use std::io::{self, Write};
use std::path::Path;

use super::BuildConfig;

/// MSVC support library that implements delay-loaded imports.
const DELAY_IMPORT_LIB: &str = "delayimp";

/// Linker family the directives are rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkerFlavor {
  /// `link.exe` / `lld-link`: import libraries and `/DELAYLOAD`.
  Msvc,
  /// GNU toolchain targeting Windows: import libraries, no delay loading.
  MinGw,
  /// ELF and Mach-O linkers: no MSVC import libraries, no delay loading.
  Unix,
}

impl LinkerFlavor {
  /// Classify a Rust target triple.
  pub fn from_target_triple(triple: &str) -> Self {
    let parts: Vec<&str> = triple.split('-').collect();
    match (parts.contains(&"windows"), parts.contains(&"msvc")) {
      (true, true) => Self::Msvc,
      (true, false) => Self::MinGw,
      (false, _) => Self::Unix,
    }
  }

  /// Classify the target of the running build script from `CARGO_CFG_TARGET_OS` and
  /// `CARGO_CFG_TARGET_ENV`.
  pub fn from_cargo_env() -> Self {
    let os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let env = std::env::var("CARGO_CFG_TARGET_ENV").unwrap_or_default();
    match (os.as_str(), env.as_str()) {
      ("windows", "msvc") => Self::Msvc,
      ("windows", _) => Self::MinGw,
      _ => Self::Unix,
    }
  }

  pub fn supports_delay_load(&self) -> bool {
    matches!(self, Self::Msvc)
  }

  fn accepts_import_library(&self, path: &Path) -> bool {
    !matches!(self, Self::Unix) || !is_msvc_import_library(path)
  }
}

impl BuildConfig {
  /// Render this configuration as `cargo:` directives for `linker`.
  pub fn cargo_directives(&self, linker: LinkerFlavor) -> Vec<String> {
    let mut lines = Vec::new();

    for path in &self.include_paths {
      lines.push(format!("cargo:include={}", path.display()));
    }

    for path in self.link_libraries.iter().filter(|path| linker.accepts_import_library(path)) {
      if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        let search = format!("cargo:rustc-link-search=native={}", dir.display());
        if !lines.contains(&search) {
          lines.push(search);
        }
      }
      if let Some(name) = link_name(path) {
        lines.push(format!("cargo:rustc-link-lib=dylib={name}"));
      }
    }

    if linker.supports_delay_load() && !self.delay_load_libraries.is_empty() {
      for name in &self.delay_load_libraries {
        lines.push(format!("cargo:rustc-link-arg=/DELAYLOAD:{name}"));
      }
      lines.push(format!("cargo:rustc-link-lib={DELAY_IMPORT_LIB}"));
    }

    for path in &self.runtime_dependencies {
      lines.push(format!("cargo:rerun-if-changed={}", path.display()));
    }

    for definition in &self.definitions {
      if definition.is_flag() {
        lines.push(format!("cargo:rustc-check-cfg=cfg({})", definition.name));
        lines.push(format!("cargo:rustc-cfg={}", definition.name));
      } else {
        lines.push(format!("cargo:rustc-env={definition}"));
      }
    }

    lines
  }

  /// Write [`BuildConfig::cargo_directives`] to `out`, one per line.
  pub fn write_cargo_directives<W: Write + ?Sized>(&self, linker: LinkerFlavor, out: &mut W) -> io::Result<()> {
    for line in self.cargo_directives(linker) {
      writeln!(out, "{line}")?;
    }
    Ok(())
  }
}

fn is_msvc_import_library(path: &Path) -> bool {
  path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("lib"))
}

/// Library name rustc expects for an import library path: the file stem, minus a `lib` prefix
/// on non-MSVC style names.
fn link_name(path: &Path) -> Option<String> {
  let stem = path.file_stem()?.to_str()?;
  if !is_msvc_import_library(path) && let Some(stripped) = stem.strip_prefix("lib") {
    return Some(stripped.to_string());
  }
  Some(stem.to_string())
}
