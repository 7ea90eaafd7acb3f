//! CLI end-to-end tests
//!
//! Tests for the componentforge command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the componentforge binary
#[allow(deprecated)]
fn componentforge_cmd() -> Command {
    Command::cargo_bin("componentforge").unwrap()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/components")
        .join(name)
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = componentforge_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = componentforge_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("componentforge"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = componentforge_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(concat!(
            "componentforge ",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_cli_inspect_component() {
    let mut cmd = componentforge_cmd();
    cmd.arg("inspect")
        .arg(fixture("mixed_command.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Component: Test_Kfp_Container_Component"))
        .stdout(predicate::str::contains("Image: image1"))
        .stdout(predicate::str::contains("{{InputUri('input1')}}"))
        .stdout(predicate::str::contains("output1: File"));
}

#[test]
fn test_cli_inspect_json() {
    let mut cmd = componentforge_cmd();
    let output = cmd
        .args(["inspect", "--json"])
        .arg(fixture("mixed_command.yaml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["executor_spec"]["image"], "image1");
    assert_eq!(value["executor_spec"]["command"][0], "command1");
    assert_eq!(value["spec"]["inputs"]["input1"], "File");
}

#[test]
fn test_cli_inspect_undeclared_reference_fails() {
    let mut cmd = componentforge_cmd();
    cmd.arg("inspect")
        .arg(fixture("undeclared_input.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("input9"));
}

#[test]
fn test_cli_inspect_nonexistent_file() {
    let mut cmd = componentforge_cmd();
    cmd.args(["inspect", "/nonexistent/component.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_normalize_wraps_literals() {
    let mut cmd = componentforge_cmd();
    let output = cmd
        .arg("normalize")
        .arg(fixture("mixed_command.yaml"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let command = &value["implementation"]["container"]["command"];
    assert_eq!(command[0], serde_json::json!({"stringValue": "command1"}));
    assert_eq!(command[2], serde_json::json!({"inputPath": "input1"}));
}

#[test]
fn test_cli_render_resolves_placeholders() {
    let mut cmd = componentforge_cmd();
    cmd.arg("render")
        .arg(fixture("echo_message.yaml"))
        .args(["--value", "message=hi there", "--output", "result=/out/r"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "docker run --rm alpine:3.19 echo --message hi there --to /out/r",
        ));
}

#[test]
fn test_cli_render_unknown_binding_fails() {
    let mut cmd = componentforge_cmd();
    cmd.arg("render")
        .arg(fixture("echo_message.yaml"))
        .args(["--input", "nope=/x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input named 'nope'"));
}

#[test]
fn test_cli_render_path_placeholder_needs_uri() {
    let mut cmd = componentforge_cmd();
    cmd.arg("render")
        .arg(fixture("mixed_command.yaml"))
        .args([
            "--value", "input1=hello", "--value", "input2=v", "--output", "output1=/o",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bound artifact has no URI"));
}

#[test]
fn test_cli_run_dry_run() {
    let mut cmd = componentforge_cmd();
    cmd.arg("run")
        .arg(fixture("echo_message.yaml"))
        .args(["--value", "message=hi", "--output", "result=/out/r", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN] Would launch: docker run --rm alpine:3.19"));
}

#[cfg(unix)]
#[test]
fn test_cli_run_with_config_runtime() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("componentforge.toml");
    let output_json = temp.path().join("out/executor_output.json");

    fs::write(
        &config_file,
        r#"
[runtime]
program = "echo"
run_args = []
timeout_secs = 30
"#,
    )
    .unwrap();

    let mut cmd = componentforge_cmd();
    cmd.arg("--config")
        .arg(&config_file)
        .arg("run")
        .arg(fixture("echo_message.yaml"))
        .args(["--value", "message=hi", "--output", "result=/out/r"])
        .arg("--tmp-dir")
        .arg(temp.path().join("tmp"))
        .arg("--output-json")
        .arg(&output_json)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "alpine:3.19 echo --message hi --to /out/r",
        ));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_json).unwrap()).unwrap();
    assert_eq!(written["result"]["code"], 0);
    assert_eq!(written["output_artifacts"]["result"][0]["uri"], "/out/r");
    assert_eq!(fs::read_dir(temp.path().join("tmp")).unwrap().count(), 1);
}

#[test]
fn test_cli_validate_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("config.toml");
    fs::write(
        &config_file,
        r#"
[logging]
level = "debug"

[engine]
args = ["--direct_num_workers=2"]
"#,
    )
    .unwrap();

    let mut cmd = componentforge_cmd();
    cmd.arg("validate-config")
        .arg(&config_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Log level: debug"))
        .stdout(predicate::str::contains("no engine is enabled"));
}

#[test]
fn test_cli_validate_invalid_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("bad.toml");
    fs::write(&config_file, "[runtime\nprogram = ").unwrap();

    let mut cmd = componentforge_cmd();
    cmd.arg("validate-config")
        .arg(&config_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_cli_config_warnings_are_logged() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("config.toml");
    fs::write(&config_file, "[logging]\nlevel = \"loud\"\n").unwrap();

    let mut cmd = componentforge_cmd();
    cmd.env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config_file)
        .arg("inspect")
        .arg(fixture("mixed_command.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Component: Test_Kfp_Container_Component"))
        .stderr(predicate::str::contains("not a recognized level"));
}
