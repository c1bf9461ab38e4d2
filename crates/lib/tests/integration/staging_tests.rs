use std::fs;

use natstage_lib::{BuildTarget, TargetPlatform};

use super::common::{TestEnv, dir_entries};

#[test]
fn second_run_performs_no_writes() {
  let env = TestEnv::with_runtime_libs("Win64");
  let resolver = env.resolver();
  let target = BuildTarget::packaged(TargetPlatform::Win64);

  let first = resolver.resolve_config(&target).unwrap();
  let staged = env.binaries_dir("Win64").join("native.dll");
  let modified = fs::metadata(&staged).unwrap().modified().unwrap();

  // Change the source; an idempotent second pass must not pick it up.
  fs::write(env.bin_path("Win64", "native.dll"), "rebuilt").unwrap();

  let mut second = natstage_lib::BuildConfig::new();
  let report = resolver.resolve(&target, &mut second).unwrap();

  assert_eq!(first, second);
  assert_eq!(report.copied_count(), 0);
  assert_eq!(report.deployments.len(), 2);
  assert_eq!(fs::read_to_string(&staged).unwrap(), "native");
  assert_eq!(fs::metadata(&staged).unwrap().modified().unwrap(), modified);
  assert_eq!(dir_entries(&env.binaries_dir("Win64")), vec!["helper.dll", "native.dll"]);
}

#[test]
fn editor_build_on_windows_copies_each_file_once() {
  let env = TestEnv::with_runtime_libs("Win64");

  let report = env
    .resolver()
    .resolve(&BuildTarget::editor(TargetPlatform::Win64), &mut natstage_lib::BuildConfig::new())
    .unwrap();

  // Both cases stage, only the first writes.
  assert_eq!(report.deployments.len(), 4);
  assert_eq!(report.copied_count(), 2);
  assert_eq!(report.staged_files().len(), 2);
}

#[test]
fn output_directory_is_created_on_demand() {
  let env = TestEnv::with_runtime_libs("Win32");
  assert!(!env.plugin_base.join("Binaries").exists());

  env
    .resolver()
    .resolve_config(&BuildTarget::packaged(TargetPlatform::Win32))
    .unwrap();

  assert!(env.binaries_dir("Win32").is_dir());
}

#[test]
fn unrelated_output_files_are_untouched() {
  let env = TestEnv::with_runtime_libs("Win64");
  let out = env.binaries_dir("Win64");
  fs::create_dir_all(&out).unwrap();
  fs::write(out.join("UnrealEditor-Vault.dll"), "module").unwrap();

  env
    .resolver()
    .resolve_config(&BuildTarget::packaged(TargetPlatform::Win64))
    .unwrap();

  assert_eq!(fs::read_to_string(out.join("UnrealEditor-Vault.dll")).unwrap(), "module");
  assert_eq!(
    dir_entries(&out),
    vec!["UnrealEditor-Vault.dll", "helper.dll", "native.dll"]
  );
}

#[test]
fn pre_existing_staged_copy_is_kept() {
  let env = TestEnv::with_runtime_libs("Win64");
  let out = env.binaries_dir("Win64");
  fs::create_dir_all(&out).unwrap();
  fs::write(out.join("helper.dll"), "loaded by editor").unwrap();

  let report = env
    .resolver()
    .resolve(&BuildTarget::packaged(TargetPlatform::Win64), &mut natstage_lib::BuildConfig::new())
    .unwrap();

  assert_eq!(report.copied_count(), 1);
  assert_eq!(fs::read_to_string(out.join("helper.dll")).unwrap(), "loaded by editor");
}
