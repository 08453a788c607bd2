use assert_cmd::Command;
use indoc::indoc;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn testrank(dir: &Path) -> Command {
    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_testrank"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    Command::from_std(cmd)
}

fn write_inputs(dir: &Path) {
    fs::write(
        dir.join("targets.json"),
        indoc! {r#"
            {"targets": [
              {"name": "calculateTotal", "path": "src/business/payment/calc.ts", "type": "function"},
              {"name": "Missing", "path": "src/ui/Missing.tsx", "type": "component"}
            ]}
        "#},
    )
    .unwrap();
    fs::write(
        dir.join("metrics.json"),
        r#"{"src/business/payment/calc.ts#calculateTotal": {"cyclomatic": 12}}"#,
    )
    .unwrap();
}

/// End-to-end: init writes a discoverable config, score emits JSON
#[test]
fn test_init_then_score_json() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    testrank(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".testrank.json").exists());

    let assert = testrank(dir.path())
        .args(["score", "-t", "targets.json", "-m", "metrics.json", "-f", "json"])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let targets = value.as_array().unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0]["name"], "calculateTotal");
    assert_eq!(targets[0]["CC"], 6);
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    testrank(dir.path()).arg("init").assert().success();
    testrank(dir.path()).arg("init").assert().failure();
    testrank(dir.path())
        .args(["init", "--force", "--preset", "layered"])
        .assert()
        .success();
}

#[test]
fn test_strict_score_fails_on_missing_metrics() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    testrank(dir.path())
        .args(["score", "-t", "targets.json", "-m", "metrics.json", "--strict"])
        .assert()
        .failure();
}

#[test]
fn test_score_writes_output_file() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path());

    testrank(dir.path())
        .args([
            "score",
            "-t",
            "targets.json",
            "-m",
            "metrics.json",
            "-f",
            "json",
            "-o",
            "out/report.json",
        ])
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("out/report.json")).unwrap();
    assert!(written.contains("src/business/payment/calc.ts"));
}

#[test]
fn test_check_config_rejects_inverted_thresholds() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".testrank.json"),
        r#"{"thresholds": {"P0": 2, "P1": 5, "P2": 9}}"#,
    )
    .unwrap();

    testrank(dir.path()).arg("check-config").assert().failure();

    // the same document aborts scoring before any target is read
    testrank(dir.path())
        .args(["score", "-t", "absent.json"])
        .assert()
        .failure();
}
