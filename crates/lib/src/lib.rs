//! natstage-lib: native dependency resolution and staging for plugin modules
//!
//! This crate configures how a host build locates, links against, and ships a prebuilt
//! native library:
//! - `platform`: target platforms, build mode, and plugin directory layout
//! - `manifest`: which files make up the vendored library
//! - `artifacts`: platform-qualified artifact paths
//! - `rules`: the host's build configuration surface and its Cargo adapter
//! - `stage`: idempotent copying of runtime libraries into the plugin's binaries tree
//! - `resolve`: the resolver tying them together

pub mod artifacts;
pub mod consts;
pub mod manifest;
pub mod platform;
pub mod resolve;
pub mod rules;
pub mod stage;

pub use artifacts::ArtifactSet;
pub use manifest::{LibraryManifest, ManifestError};
pub use platform::{BuildTarget, PlatformName, PlatformParseError, TargetPlatform};
pub use resolve::{MissingArtifactError, ResolveCase, ResolveError, ResolveReport, Resolver};
pub use rules::cargo::LinkerFlavor;
pub use rules::{BuildConfig, BuildRules, Definition, ModuleType};
pub use stage::{DeploymentRecord, StageError, stage_file};
