/// CPU architectures relevant to picking a vendored library flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  X86_64,
  X86,
}

impl Arch {
  /// Detect the host CPU architecture at runtime
  pub fn current() -> Option<Self> {
    Self::from_name(std::env::consts::ARCH)
  }

  /// Map an architecture name from `std::env::consts::ARCH` or the first triple component
  pub fn from_name(name: &str) -> Option<Self> {
    match name {
      "x86_64" => Some(Self::X86_64),
      "x86" | "i386" | "i586" | "i686" => Some(Self::X86),
      _ => None,
    }
  }

  /// Returns the architecture of a Rust target triple
  pub fn from_triple(triple: &str) -> Option<Self> {
    triple.split('-').next().and_then(Self::from_name)
  }
}
