/// Operating system families a build can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// Detect the host operating system at runtime
  pub fn current() -> Option<Self> {
    Self::from_name(std::env::consts::OS)
  }

  /// Map an OS name as it appears in `std::env::consts::OS` or a target triple
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "linux" => Some(Self::Linux),
      "macos" | "darwin" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Find the OS component of a Rust target triple (e.g. `x86_64-pc-windows-msvc`)
  pub fn from_triple(triple: &str) -> Option<Self> {
    triple.split('-').skip(1).find_map(Self::from_name)
  }
}
