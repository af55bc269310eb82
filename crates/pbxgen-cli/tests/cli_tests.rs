//! Integration tests for the `pbxgen` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"
name: Demo
options:
  bundleIdPrefix: com.example
targets:
  App:
    type: application
    platform: iOS
    sources: [App]
"#;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A project directory with `project.yml` and one Swift source.
fn fixture(manifest: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "project.yml", manifest);
    write(dir.path(), "App/main.swift", "print(\"hi\")\n");
    dir
}

/// The binary, isolated from the caller's environment and config.
fn pbxgen(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("pbxgen");
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env("NO_COLOR", "1");
    cmd
}

fn pbxproj(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("Demo.xcodeproj/project.pbxproj")).unwrap()
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn help_describes_the_tool() {
    let dir = tempfile::tempdir().unwrap();
    pbxgen(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate Xcode projects"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn version_flag() {
    let dir = tempfile::tempdir().unwrap();
    pbxgen(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_arguments_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    pbxgen(&dir).assert().failure().code(2);
}

// ── generate ──────────────────────────────────────────────────────────────────

#[test]
fn generate_writes_next_to_the_manifest() {
    let dir = fixture(MANIFEST);
    pbxgen(&dir)
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated"));

    let contents = pbxproj(&dir);
    assert!(contents.starts_with("// !$*UTF8*$!"));
    assert!(contents.contains("main.swift"));
    assert!(contents.contains("PRODUCT_BUNDLE_IDENTIFIER = com.example.App;"));
}

#[test]
fn generate_honours_output_and_xcode_version() {
    let dir = fixture(MANIFEST);
    pbxgen(&dir)
        .args(["generate", "project.yml", "-o", "out", "--xcode-version", "1500"])
        .assert()
        .success();

    let contents =
        fs::read_to_string(dir.path().join("out/Demo.xcodeproj/project.pbxproj")).unwrap();
    assert!(contents.contains("LastUpgradeCheck = 1500;"));
}

#[test]
fn generate_is_reproducible() {
    let dir = fixture(MANIFEST);
    pbxgen(&dir).arg("generate").assert().success();
    let first = pbxproj(&dir);
    pbxgen(&dir).arg("generate").assert().success();
    assert_eq!(first, pbxproj(&dir));
}

#[test]
fn dry_run_prints_without_writing() {
    let dir = fixture(MANIFEST);
    pbxgen(&dir)
        .args(["generate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rootObject = "));
    assert!(!dir.path().join("Demo.xcodeproj").exists());
}

#[test]
fn json_output_reports_the_written_path() {
    let dir = fixture(MANIFEST);
    let assert = pbxgen(&dir)
        .args(["generate", "--output-format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(report["project"], "Demo");
    assert!(report["objects"].as_u64().unwrap() > 0);
    assert!(
        report["path"]
            .as_str()
            .unwrap()
            .ends_with("Demo.xcodeproj/project.pbxproj")
    );
}

#[test]
fn toml_manifests_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "project.toml",
        "name = \"Demo\"\n\n[targets.App]\ntype = \"application\"\nplatform = \"macOS\"\nsources = [\"App\"]\n",
    );
    write(dir.path(), "App/main.swift", "\n");
    pbxgen(&dir)
        .args(["generate", "project.toml"])
        .assert()
        .success();
    assert!(pbxproj(&dir).contains("SDKROOT = macosx;"));
}

// ── failures ──────────────────────────────────────────────────────────────────

#[test]
fn missing_manifest_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    pbxgen(&dir)
        .args(["generate", "absent.yml"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Manifest not found"));
}

#[test]
fn unsupported_extension_is_a_user_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "project.txt", "name: Demo\n");
    pbxgen(&dir)
        .args(["generate", "project.txt"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn unknown_target_type_is_a_user_error() {
    let dir = fixture("name: Demo\ntargets:\n  App:\n    type: spaceship\n    platform: iOS\n");
    pbxgen(&dir)
        .arg("generate")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn unknown_dependency_fails_only_in_strict_mode() {
    let manifest = format!("{MANIFEST}    dependencies:\n      - target: Ghost\n");
    let dir = fixture(&manifest);

    pbxgen(&dir).arg("generate").assert().success();
    pbxgen(&dir)
        .args(["generate", "--strict"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Ghost"));
}

#[test]
fn missing_build_script_is_not_found() {
    let manifest = format!("{MANIFEST}    prebuildScripts:\n      - path: scripts/lint.sh\n");
    let dir = fixture(&manifest);
    pbxgen(&dir)
        .arg("generate")
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("lint.sh"));
}

// ── dump ──────────────────────────────────────────────────────────────────────

#[test]
fn dump_prints_the_graph_as_json() {
    let dir = fixture(MANIFEST);
    let assert = pbxgen(&dir).args(["dump", "--compact"]).assert().success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let graph: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(graph["archiveVersion"], 1);
    assert_eq!(graph["objectVersion"], 46);
    let root = graph["rootObject"].as_str().unwrap();
    assert_eq!(graph["objects"][root]["isa"], "PBXProject");
    assert!(!dir.path().join("Demo.xcodeproj").exists());
}

// ── completions ───────────────────────────────────────────────────────────────

#[test]
fn completions_for_bash() {
    let dir = tempfile::tempdir().unwrap();
    pbxgen(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pbxgen"));
}

// ── config ────────────────────────────────────────────────────────────────────

#[test]
fn config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("pbxgen.toml");
    let file = file.to_str().unwrap();

    pbxgen(&dir)
        .args(["--config", file, "config", "set", "xcode_version", "1600"])
        .assert()
        .success();
    pbxgen(&dir)
        .args(["--config", file, "config", "get", "xcode_version"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1600\n"));
}

#[test]
fn configured_output_dir_is_used() {
    let dir = fixture(MANIFEST);
    write(
        dir.path(),
        "pbxgen.toml",
        "[defaults]\noutput_dir = \"generated\"\n",
    );
    pbxgen(&dir)
        .args(["--config", "pbxgen.toml", "generate"])
        .assert()
        .success();
    assert!(
        dir.path()
            .join("generated/Demo.xcodeproj/project.pbxproj")
            .is_file()
    );
}

#[test]
fn environment_overrides_the_config_file() {
    let dir = fixture(MANIFEST);
    pbxgen(&dir)
        .env("PBXGEN_XCODE_VERSION", "1410")
        .arg("generate")
        .assert()
        .success();
    assert!(pbxproj(&dir).contains("LastUpgradeCheck = 1410;"));
}

#[test]
fn unknown_config_key_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    pbxgen(&dir)
        .args(["config", "get", "templates.registry"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn missing_config_file_is_a_configuration_error() {
    let dir = fixture(MANIFEST);
    pbxgen(&dir)
        .args(["--config", "nope.toml", "generate"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn config_path_prints_the_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    pbxgen(&dir)
        .args(["--config", "custom.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}
