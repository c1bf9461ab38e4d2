/// Environment variable that overrides the plugin base directory derived from a module root.
pub const PLUGIN_BASE_ENV: &str = "NATSTAGE_PLUGIN_BASE";

/// Optional per-module manifest file, looked up in the module root.
pub const MANIFEST_FILENAME: &str = "natstage.json";

/// Levels between a third-party module root and the plugin base (`<Plugin>/Source/ThirdParty/<module>`).
pub const MODULE_DEPTH: usize = 3;

/// Directory under the plugin base that receives staged runtime libraries.
pub const BINARIES_DIR: &str = "Binaries";
