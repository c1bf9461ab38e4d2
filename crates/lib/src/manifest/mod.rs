//! Native library manifest.
//!
//! A manifest names the files that make up one vendored native library: where its headers
//! live, which import library the linker binds against, and which runtime-loadable
//! libraries must ship next to the plugin binaries. The defaults describe libssh with its
//! pthreads helper; a module can override them with a `natstage.json` in its root.

mod types;

pub use types::*;
