use natstage_lib::{BuildTarget, LinkerFlavor, TargetPlatform};

use super::common::TestEnv;

#[test]
fn resolved_config_renders_build_script_directives() {
  let env = TestEnv::with_runtime_libs("Win64");
  let triple = "x86_64-pc-windows-msvc";
  let target = BuildTarget::from_target_triple(triple, false).unwrap();
  assert_eq!(target.platform, TargetPlatform::Win64);

  let config = env.resolver().resolve_config(&target).unwrap();
  let mut out = Vec::new();
  config
    .write_cargo_directives(LinkerFlavor::from_target_triple(triple), &mut out)
    .unwrap();
  let text = String::from_utf8(out).unwrap();

  assert!(text.contains("cargo:rustc-link-lib=dylib=native\n"));
  assert!(text.contains("cargo:rustc-link-arg=/DELAYLOAD:native.dll\n"));
  assert!(text.contains("cargo:rustc-link-arg=/DELAYLOAD:helper.dll\n"));
  assert!(text.contains("cargo:rustc-cfg=WITH_NATIVE\n"));
  assert!(text.contains(&format!(
    "cargo:rerun-if-changed={}\n",
    env.bin_path("Win64", "helper.dll").display()
  )));
}

#[test]
fn editor_build_for_linux_target_emits_no_msvc_directives() {
  let env = TestEnv::with_runtime_libs("Linux");
  let triple = "x86_64-unknown-linux-gnu";
  let target = BuildTarget::from_target_triple(triple, true).unwrap();

  let config = env.resolver().resolve_config(&target).unwrap();
  assert_eq!(config.delay_load_libraries, vec!["native.dll", "helper.dll"]);

  let lines = config.cargo_directives(LinkerFlavor::from_target_triple(triple));
  assert!(!lines.iter().any(|l| l.contains("/DELAYLOAD")), "{lines:?}");
  assert!(!lines.iter().any(|l| l.ends_with("=delayimp")), "{lines:?}");
  assert!(!lines.iter().any(|l| l.contains("native.lib") || l.ends_with("dylib=native")));
  assert!(lines.contains(&"cargo:rustc-cfg=WITH_NATIVE".to_string()));
}

#[test]
fn non_windows_triple_renders_include_and_flag_only() {
  let env = TestEnv::new();
  let triple = "x86_64-unknown-linux-gnu";
  let target = BuildTarget::from_target_triple(triple, false).unwrap();

  let lines = env
    .resolver()
    .resolve_config(&target)
    .unwrap()
    .cargo_directives(LinkerFlavor::from_target_triple(triple));

  assert_eq!(
    lines,
    vec![
      format!("cargo:include={}", env.module_root.join("include").display()),
      "cargo:rustc-check-cfg=cfg(WITH_NATIVE)".to_string(),
      "cargo:rustc-cfg=WITH_NATIVE".to_string(),
    ]
  );
}
