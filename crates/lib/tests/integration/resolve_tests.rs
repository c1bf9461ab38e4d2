use natstage_lib::{BuildConfig, BuildRules, BuildTarget, Definition, ResolveError, TargetPlatform};

use super::common::{TestEnv, dir_entries};

#[test]
fn editor_build_on_win64_registers_and_stages() {
  let env = TestEnv::with_runtime_libs("Win64");
  let mut config = BuildConfig::new();

  let report = env
    .resolver()
    .resolve(&BuildTarget::editor(TargetPlatform::Win64), &mut config)
    .unwrap();

  assert_eq!(config.include_paths, vec![env.module_root.join("include")]);
  assert_eq!(
    config.link_libraries,
    vec![env.module_root.join("Win64").join("lib").join("native.lib")]
  );
  assert_eq!(config.delay_load_libraries, vec!["native.dll", "helper.dll"]);
  assert_eq!(
    config.runtime_dependencies,
    vec![env.bin_path("Win64", "native.dll"), env.bin_path("Win64", "helper.dll")]
  );
  assert_eq!(config.definitions, vec![Definition::flag("WITH_NATIVE")]);

  assert_eq!(report.copied_count(), 2);
  assert_eq!(dir_entries(&env.binaries_dir("Win64")), vec!["helper.dll", "native.dll"]);
}

#[test]
fn packaged_win32_stages_into_win32_binaries() {
  let env = TestEnv::with_runtime_libs("Win32");

  let config = env
    .resolver()
    .resolve_config(&BuildTarget::packaged(TargetPlatform::Win32))
    .unwrap();

  assert_eq!(config.delay_load_libraries.len(), 2);
  assert_eq!(dir_entries(&env.binaries_dir("Win32")), vec!["helper.dll", "native.dll"]);
  assert!(!env.binaries_dir("Win64").exists());
}

#[test]
fn unsupported_packaged_platform_is_silent_noop() {
  let env = TestEnv::new();
  let mut config = BuildConfig::new();

  let report = env
    .resolver()
    .resolve(&BuildTarget::packaged("Linux".parse::<TargetPlatform>().unwrap()), &mut config)
    .unwrap();

  assert!(report.is_noop());
  assert!(report.deployments.is_empty());
  assert_eq!(config.include_paths, vec![env.module_root.join("include")]);
  assert!(config.link_libraries.is_empty());
  assert!(config.runtime_dependencies.is_empty());
  assert!(!env.plugin_base.join("Binaries").exists());
}

#[test]
fn missing_helper_names_both_paths_and_copies_nothing() {
  let env = TestEnv::new();
  env.vendor_file("Win64", "bin", "native.dll", "native");
  let mut config = BuildConfig::new();

  let err = env
    .resolver()
    .resolve(&BuildTarget::editor(TargetPlatform::Win64), &mut config)
    .unwrap_err();

  let message = err.to_string();
  assert!(message.contains(&env.bin_path("Win64", "native.dll").display().to_string()));
  assert!(message.contains(&env.bin_path("Win64", "helper.dll").display().to_string()));

  match err {
    ResolveError::MissingArtifact(missing) => {
      assert_eq!(missing.missing, vec![env.bin_path("Win64", "helper.dll")]);
    }
    other => panic!("unexpected error: {other}"),
  }

  assert!(config.delay_load_libraries.is_empty());
  assert!(config.include_paths.is_empty());
  assert!(!env.binaries_dir("Win64").join("native.dll").exists());
}

#[test]
fn missing_native_library_fails_too() {
  let env = TestEnv::new();
  env.vendor_file("Win32", "bin", "helper.dll", "helper");

  let err = env
    .resolver()
    .resolve_config(&BuildTarget::packaged(TargetPlatform::Win32))
    .unwrap_err();

  assert!(matches!(err, ResolveError::MissingArtifact(_)));
}

#[test]
fn missing_import_library_is_not_checked() {
  let env = TestEnv::new();
  env.vendor_file("Win64", "bin", "native.dll", "native");
  env.vendor_file("Win64", "bin", "helper.dll", "helper");

  let config = env
    .resolver()
    .resolve_config(&BuildTarget::packaged(TargetPlatform::Win64))
    .unwrap();

  assert_eq!(config.link_libraries.len(), 1);
  assert!(!config.link_libraries[0].exists());
}

#[test]
fn failed_resolution_keeps_earlier_host_state() {
  let env = TestEnv::new();
  let mut config = BuildConfig::new();
  config.add_definition(Definition::new("HOST_BUILD", "Development"));

  let before = config.clone();
  let result = env
    .resolver()
    .resolve(&BuildTarget::packaged(TargetPlatform::Win64), &mut config);

  assert!(result.is_err());
  assert_eq!(config, before);
}
