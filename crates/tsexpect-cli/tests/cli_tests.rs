//! End-to-end runs of the `tsexpect` binary against fixtures on disk.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use tsexpect_cli::config::{OutputFormat, find_config, load_config, resolve_options};
use tsexpect_cli::driver::run_fixture;
use tsexpect_cli::fixture::load_fixture;

const PASSING: &str = r#"{
    "types": {
        "User": {
            "object": {
                "id": "number",
                "name": { "type": "string", "readonly": true },
                "email": { "type": "string", "optional": true }
            }
        },
        "Load": { "function": { "params": ["number"], "returns": { "promise": "User" } } }
    },
    "assertions": [
        { "actual": "User", "check": "toBeObject" },
        { "actual": "User", "path": [{ "property": "email" }], "check": "toBeNullable" },
        { "actual": "Load", "path": ["returns", "resolves", { "property": "id" }], "check": "toBeNumber" },
        { "actual": "Load", "check": "toBeCallableWith", "args": [{ "literal": 7 }] },
        { "actual": "Load", "not": true, "check": "toBeCallableWith", "args": ["string"] }
    ]
}"#;

const FAILING: &str = r#"{
    "assertions": [
        {
            "actual": { "object": { "a": "number", "b": { "object": { "c": "string" } } } },
            "check": "toBeIdenticalTo",
            "expected": { "object": { "a": "number", "b": { "object": { "c": "number" } } } }
        },
        { "actual": "number", "check": "toBeNumber" }
    ]
}"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

fn tsexpect(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tsexpect"))
        .args(args)
        .env_remove("TSEXPECT_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("run tsexpect")
}

#[test]
fn library_pipeline_loads_and_runs_a_fixture() {
    let dir = TempDir::new().unwrap();
    let fixture_path = write_file(dir.path(), "user.json", PASSING);
    write_file(dir.path(), "tsexpect.json", r#"{ "format": "json", "failFast": "true" }"#);

    let config_path = find_config(None, &fixture_path).unwrap();
    let config = load_config(&config_path).unwrap();
    let options = resolve_options(&config, None, false, false, false);
    assert_eq!(options.format, OutputFormat::Json);
    assert!(options.fail_fast);

    let fixture = load_fixture(&fixture_path).unwrap();
    let report = run_fixture(&fixture, options.fail_fast).unwrap();
    // The negated callable check has no negated form.
    assert_eq!(report.passed, 4);
    assert_eq!(report.failed, 1);
    assert_eq!(
        report.outcomes[4].message.as_deref(),
        Some("toBeCallableWith cannot be used after .not()")
    );
}

#[test]
fn load_fixture_errors_name_the_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    let err = load_fixture(&missing).unwrap_err();
    assert!(err.to_string().starts_with("failed to read fixture"));

    let broken = write_file(dir.path(), "broken.json", "{ \"types\": ");
    let err = load_fixture(&broken).unwrap_err();
    assert!(err.to_string().starts_with("failed to parse fixture"));
    assert!(format!("{err:#}").contains("invalid fixture JSON"));
}

#[test]
fn check_exits_nonzero_on_failures() {
    let dir = TempDir::new().unwrap();
    let fixture = write_file(dir.path(), "failing.json", FAILING);

    let output = tsexpect(&["check", fixture.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✗ #0 toBeIdenticalTo"));
    assert!(stdout.contains("at b.c: expected number, actual string"));
    assert!(stdout.contains("✓ #1 toBeNumber"));
    assert!(stdout.ends_with("1 passed, 1 failed\n"));
}

#[test]
fn check_honors_format_and_fail_fast_flags() {
    let dir = TempDir::new().unwrap();
    let fixture = write_file(dir.path(), "failing.json", FAILING);

    let output = tsexpect(&["check", fixture.to_str().unwrap(), "--fail-fast", "--format", "json"]);
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["failed"], 1);
    assert_eq!(report["skipped"], 1);
    assert_eq!(
        report["outcomes"][0]["mismatch"]["b"]["c"],
        "Expected: number, Actual: string"
    );
}

#[test]
fn props_and_explain_commands() {
    let dir = TempDir::new().unwrap();
    let fixture = write_file(dir.path(), "user.json", PASSING);
    let fixture = fixture.to_str().unwrap();

    let output = tsexpect(&["props", fixture, "User"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(".id: number\n"));
    assert!(stdout.contains(".email?: "));

    let output = tsexpect(&["explain", fixture, "User", "User"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("identical: yes\n"));

    let output = tsexpect(&["explain", fixture, r#"{ "literal": 1 }"#, "number", "--format", "json"]);
    assert_eq!(output.status.code(), Some(1));
    let explanation: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(explanation["extends"], true);
    assert_eq!(explanation["mismatch"], "Expected: number, Actual: literal number: 1");
}

#[test]
fn unknown_types_are_reported_on_stderr() {
    let dir = TempDir::new().unwrap();
    let fixture = write_file(
        dir.path(),
        "bad.json",
        r#"{ "assertions": [{ "actual": "Nope", "check": "toBeAny" }] }"#,
    );

    let output = tsexpect(&["check", fixture.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to build types from"));
    assert!(stderr.contains("unknown type `Nope`"));
}
