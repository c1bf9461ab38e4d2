//! Native dependency resolution and deployment.
//!
//! Given a [`BuildTarget`], the [`Resolver`] registers the native library's include path,
//! import library, delay-loaded runtime libraries and capability definition with the host's
//! [`BuildRules`], then stages the runtime libraries into `<plugin>/Binaries/<platform>/`.
//!
//! # Cases
//!
//! Resolution beyond the include path happens for editor builds and for the supported
//! Windows platforms. Each applicable [`ResolveCase`] runs the same derivation; anything else
//! is a silent no-op, since only those platforms ship the library.
//!
//! # Failure
//!
//! Runtime libraries are verified before anything is registered or copied for a case. A
//! missing one aborts with [`MissingArtifactError`]. Registrations are collected first and
//! handed to the host only after every case has succeeded, so a failed resolution leaves the
//! host's configuration untouched.

mod types;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub use types::*;

use crate::artifacts::ArtifactSet;
use crate::manifest::{LibraryManifest, ManifestError};
use crate::platform::paths::{binaries_dir, plugin_base_dir};
use crate::platform::{BuildTarget, TargetPlatform};
use crate::rules::{BuildConfig, BuildRules, Definition, ModuleType};
use crate::stage::stage_file;

/// Resolves and deploys one vendored native library for a plugin module.
#[derive(Debug, Clone)]
pub struct Resolver {
  module_root: PathBuf,
  plugin_base: PathBuf,
  manifest: LibraryManifest,
}

impl Resolver {
  pub fn new(module_root: impl Into<PathBuf>, plugin_base: impl Into<PathBuf>, manifest: LibraryManifest) -> Self {
    Self {
      module_root: module_root.into(),
      plugin_base: plugin_base.into(),
      manifest,
    }
  }

  /// Create a resolver for a third-party module directory.
  ///
  /// The manifest comes from the module's `natstage.json` (or the defaults) and the plugin
  /// base from `NATSTAGE_PLUGIN_BASE` or the module's position in the plugin tree.
  pub fn for_module(module_root: impl Into<PathBuf>) -> Result<Self, ManifestError> {
    let module_root = module_root.into();
    let manifest = LibraryManifest::for_module(&module_root)?;
    let plugin_base = plugin_base_dir(&module_root);
    Ok(Self::new(module_root, plugin_base, manifest))
  }

  pub fn module_root(&self) -> &Path {
    &self.module_root
  }

  pub fn plugin_base(&self) -> &Path {
    &self.plugin_base
  }

  pub fn manifest(&self) -> &LibraryManifest {
    &self.manifest
  }

  pub fn artifacts(&self, platform: &TargetPlatform) -> ArtifactSet {
    ArtifactSet::derive(&self.module_root, platform, &self.manifest)
  }

  /// Directory runtime libraries for `platform` are staged into.
  pub fn output_dir(&self, platform: &TargetPlatform) -> PathBuf {
    binaries_dir(&self.plugin_base, platform)
  }

  /// Cases that apply to `target`, in evaluation order.
  pub fn applicable_cases(target: &BuildTarget) -> Vec<ResolveCase> {
    let mut cases = Vec::new();
    if target.editor_build {
      cases.push(ResolveCase::EditorBuild);
    }
    if target.platform.is_supported_windows() {
      cases.push(ResolveCase::WindowsPlatform);
    }
    cases
  }

  /// Resolve and stage the native library for `target`, registering the result with `rules`.
  pub fn resolve<R: BuildRules + ?Sized>(
    &self,
    target: &BuildTarget,
    rules: &mut R,
  ) -> Result<ResolveReport, ResolveError> {
    info!(
      platform = %target.platform,
      editor = target.editor_build,
      module = %self.module_root.display(),
      "resolving native dependencies"
    );

    let mut pending = BuildConfig::new();
    pending.set_module_type(ModuleType::External);
    pending.add_definition(Definition::flag(self.manifest.definition.as_str()));
    pending.add_include_path(self.module_root.join(&self.manifest.include_dir));

    let cases = Self::applicable_cases(target);
    if cases.is_empty() {
      debug!(platform = %target.platform, "native library not shipped for platform, skipping");
    }

    let mut report = ResolveReport::default();
    for &case in &cases {
      self.resolve_case(case, &target.platform, &mut pending, &mut report)?;
    }
    report.cases = cases;

    pending.apply_to(rules);
    Ok(report)
  }

  /// Resolve into a fresh [`BuildConfig`].
  pub fn resolve_config(&self, target: &BuildTarget) -> Result<BuildConfig, ResolveError> {
    let mut config = BuildConfig::new();
    self.resolve(target, &mut config)?;
    Ok(config)
  }

  fn resolve_case(
    &self,
    case: ResolveCase,
    platform: &TargetPlatform,
    pending: &mut BuildConfig,
    report: &mut ResolveReport,
  ) -> Result<(), ResolveError> {
    debug!(case = %case, platform = %platform, "evaluating resolution case");
    let artifacts = self.artifacts(platform);

    // A missing import library surfaces at link time.
    pending.add_link_library(artifacts.import_library.clone());

    let missing: Vec<PathBuf> = artifacts.missing_loadables().into_iter().map(Path::to_path_buf).collect();
    if !missing.is_empty() {
      warn!(case = %case, platform = %platform, missing = ?missing, "runtime libraries not found");
      return Err(
        MissingArtifactError {
          expected: artifacts.loadable_libraries,
          missing,
        }
        .into(),
      );
    }

    for path in &artifacts.loadable_libraries {
      if let Some(name) = path.file_name() {
        pending.add_delay_load_library(name.to_string_lossy().into_owned());
      }
      pending.add_runtime_dependency(path.clone());
    }

    let output_dir = self.output_dir(platform);
    for path in &artifacts.loadable_libraries {
      report.deployments.push(stage_file(path, &output_dir)?);
    }

    Ok(())
  }
}
