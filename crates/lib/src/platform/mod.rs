//! Target platform identification.
//!
//! The host build supplies a [`BuildTarget`] for every configuration pass: the platform
//! being built for and whether the build is an editor build. A [`TargetPlatform`] maps to
//! the directory segment used both in the vendored artifact tree (`<module>/<segment>/bin`)
//! and in the plugin's staged output tree (`<plugin>/Binaries/<segment>`).

pub mod arch;
pub mod os;
pub mod paths;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use arch::Arch;
use os::Os;

/// Errors produced when parsing a platform name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformParseError {
  #[error("platform name is empty")]
  Empty,

  /// The name would not be a single path segment.
  #[error("platform name '{0}' must not contain path separators")]
  InvalidSegment(String),
}

/// Name of a platform outside the supported Windows set.
///
/// Only constructed through [`TargetPlatform`]'s parsing and detection, so it is always a
/// single non-empty path segment that does not name a Windows variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformName(String);

impl PlatformName {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for PlatformName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Platform a build is targeting.
///
/// Only the two Windows variants ship the native library; every other platform is carried
/// by name so its path segment can still be derived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetPlatform {
  Win64,
  Win32,
  Other(PlatformName),
}

impl TargetPlatform {
  /// Path segment naming this platform in artifact and output trees.
  pub fn as_segment(&self) -> &str {
    match self {
      Self::Win64 => "Win64",
      Self::Win32 => "Win32",
      Self::Other(name) => name.as_str(),
    }
  }

  /// Whether this is one of the Windows variants the native library ships for.
  pub fn is_supported_windows(&self) -> bool {
    matches!(self, Self::Win64 | Self::Win32)
  }

  fn other(name: &str) -> Self {
    Self::Other(PlatformName(name.to_string()))
  }

  /// Combine a detected architecture and OS into a target platform.
  pub fn from_parts(arch: Option<Arch>, os: Option<Os>) -> Option<Self> {
    match (arch, os?) {
      (Some(Arch::X86_64), Os::Windows) => Some(Self::Win64),
      (Some(Arch::X86), Os::Windows) => Some(Self::Win32),
      (_, Os::Linux) => Some(Self::other("Linux")),
      (_, Os::MacOs) => Some(Self::other("Mac")),
      (_, Os::Windows) => None,
    }
  }

  /// Map a Rust target triple (e.g. the `TARGET` variable of a build script).
  ///
  /// Triples without a known mapping are carried as [`TargetPlatform::Other`], subject to
  /// the same checks as [`FromStr`].
  pub fn from_target_triple(triple: &str) -> Result<Self, PlatformParseError> {
    match Self::from_parts(Arch::from_triple(triple), Os::from_triple(triple)) {
      Some(platform) => Ok(platform),
      None => triple.parse(),
    }
  }

  /// Detect the host platform.
  pub fn current() -> Self {
    Self::from_parts(Arch::current(), Os::current())
      .unwrap_or_else(|| Self::other(&format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS)))
  }
}

impl FromStr for TargetPlatform {
  type Err = PlatformParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let name = s.trim();
    if name.is_empty() {
      return Err(PlatformParseError::Empty);
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
      return Err(PlatformParseError::InvalidSegment(name.to_string()));
    }

    if name.eq_ignore_ascii_case("win64") {
      Ok(Self::Win64)
    } else if name.eq_ignore_ascii_case("win32") {
      Ok(Self::Win32)
    } else {
      Ok(Self::other(name))
    }
  }
}

impl TryFrom<String> for TargetPlatform {
  type Error = PlatformParseError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<TargetPlatform> for String {
  fn from(platform: TargetPlatform) -> Self {
    platform.as_segment().to_string()
  }
}

impl fmt::Display for TargetPlatform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_segment())
  }
}

/// The platform and build mode of one configuration pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildTarget {
  pub platform: TargetPlatform,
  /// True for editor builds, false for packaged builds.
  #[serde(default)]
  pub editor_build: bool,
}

impl BuildTarget {
  pub fn new(platform: TargetPlatform, editor_build: bool) -> Self {
    Self { platform, editor_build }
  }

  pub fn editor(platform: TargetPlatform) -> Self {
    Self::new(platform, true)
  }

  pub fn packaged(platform: TargetPlatform) -> Self {
    Self::new(platform, false)
  }

  /// Build a target from a Rust target triple.
  pub fn from_target_triple(triple: &str, editor_build: bool) -> Result<Self, PlatformParseError> {
    Ok(Self::new(TargetPlatform::from_target_triple(triple)?, editor_build))
  }
}

impl fmt::Display for BuildTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mode = if self.editor_build { "editor" } else { "packaged" };
    write!(f, "{} ({})", self.platform, mode)
  }
}
