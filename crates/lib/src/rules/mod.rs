//! Host build configuration.
//!
//! [`BuildRules`] is the seam between the resolver and whatever build system consumes it.
//! [`BuildConfig`] is the recording implementation: the resolver accumulates registrations
//! into one and replays them onto the host's rules once resolution has succeeded.
//!
//! # Submodules
//!
//! - [`cargo`] - Renders a [`BuildConfig`] as Cargo build script directives

pub mod cargo;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How the host should treat the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
  /// Prebuilt artifacts only; nothing is compiled from source.
  External,
}

/// A build-time symbol, rendered as `NAME=VALUE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Definition {
  pub name: String,
  pub value: String,
}

impl Definition {
  pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: value.into(),
    }
  }

  /// A boolean capability flag (`NAME=1`).
  pub fn flag(name: impl Into<String>) -> Self {
    Self::new(name, "1")
  }

  pub fn is_flag(&self) -> bool {
    self.value == "1"
  }
}

impl fmt::Display for Definition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}={}", self.name, self.value)
  }
}

/// Configuration surface a host build system exposes to a module.
pub trait BuildRules {
  fn set_module_type(&mut self, module_type: ModuleType);

  /// Compile-time header search path.
  fn add_include_path(&mut self, path: PathBuf);

  /// Import library the linker binds against.
  fn add_link_library(&mut self, path: PathBuf);

  /// Library whose loader binding is deferred until first use, by file name.
  fn add_delay_load_library(&mut self, name: String);

  /// File that must ship with any distributable build.
  fn add_runtime_dependency(&mut self, path: PathBuf);

  fn add_definition(&mut self, definition: Definition);
}

/// Recorded build configuration.
///
/// Every list keeps insertion order and ignores repeated registrations, so evaluating the
/// same resolution case twice leaves the configuration unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
  pub module_type: Option<ModuleType>,
  pub include_paths: Vec<PathBuf>,
  pub link_libraries: Vec<PathBuf>,
  pub delay_load_libraries: Vec<String>,
  pub runtime_dependencies: Vec<PathBuf>,
  pub definitions: Vec<Definition>,
}

impl BuildConfig {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replay this configuration onto another set of rules.
  pub fn apply_to<R: BuildRules + ?Sized>(&self, rules: &mut R) {
    if let Some(module_type) = self.module_type {
      rules.set_module_type(module_type);
    }
    for definition in &self.definitions {
      rules.add_definition(definition.clone());
    }
    for path in &self.include_paths {
      rules.add_include_path(path.clone());
    }
    for path in &self.link_libraries {
      rules.add_link_library(path.clone());
    }
    for name in &self.delay_load_libraries {
      rules.add_delay_load_library(name.clone());
    }
    for path in &self.runtime_dependencies {
      rules.add_runtime_dependency(path.clone());
    }
  }
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
  if !items.contains(&item) {
    items.push(item);
  }
}

impl BuildRules for BuildConfig {
  fn set_module_type(&mut self, module_type: ModuleType) {
    self.module_type = Some(module_type);
  }

  fn add_include_path(&mut self, path: PathBuf) {
    push_unique(&mut self.include_paths, path);
  }

  fn add_link_library(&mut self, path: PathBuf) {
    push_unique(&mut self.link_libraries, path);
  }

  fn add_delay_load_library(&mut self, name: String) {
    push_unique(&mut self.delay_load_libraries, name);
  }

  fn add_runtime_dependency(&mut self, path: PathBuf) {
    push_unique(&mut self.runtime_dependencies, path);
  }

  fn add_definition(&mut self, definition: Definition) {
    // A later definition of the same symbol replaces its value.
    match self.definitions.iter_mut().find(|d| d.name == definition.name) {
      Some(existing) => *existing = definition,
      None => self.definitions.push(definition),
    }
  }
}
